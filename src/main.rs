// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use scholsync::{
    cache::{CacheError, CacheStore, CleanOutcome},
    config::Settings,
    path,
    record::{ProjectKind, MODEL_AUGMENTATION},
    remote::{sanitize_filename, RemoteClient, UploadField},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "\n  scholsync [options] <command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Alternate settings file to read instead of the default location.
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self, store: &mut CacheStore, settings: &Settings) -> Result<()> {
        match self.command {
            Command::Login(opts) => run_login(store, opts),
            Command::Project(opts) => run_project(store, opts),
            Command::Augmentation(opts) => run_augmentation(store, settings, opts),
            Command::DownloadAugFiles(opts) => run_download_aug_files(store, opts),
            Command::UploadAugFiles(opts) => run_upload_aug_files(store, opts),
            Command::DownloadQr(opts) => run_download_qr(store, opts),
            Command::SaveSession(opts) => run_save_session(store, opts),
            Command::OpenSession(opts) => run_open_session(store, opts),
            Command::ExportTargetImage(opts) => run_export_target_image(store, opts),
            Command::ExportModel(opts) => run_export_model(store, opts),
            Command::ExportQr(opts) => run_export_qr(store, opts),
            Command::ExportAll(opts) => run_export_all(store, opts),
            Command::Status(opts) => run_status(store, opts),
            Command::CleanLocal(opts) => run_clean_local(store, opts),
            Command::RemoveUser(opts) => run_remove_user(store, opts),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Store a username and API token and pull the user's project listing.
    #[command(override_usage = "scholsync login <username> [api_token]")]
    Login(LoginOptions),

    /// Create a project on Schol-AR, or select an existing one.
    #[command(override_usage = "scholsync project [options] <username> <project_title>")]
    Project(ProjectOptions),

    /// Create an augmentation for a project, or select an existing one.
    #[command(
        override_usage = "scholsync augmentation [options] <username> <project_title> <augmentation_title>"
    )]
    Augmentation(AugmentationOptions),

    /// Download augmentation files into the local cache.
    DownloadAugFiles(DownloadAugFilesOptions),

    /// Upload augmentation files from local paths to Schol-AR.
    UploadAugFiles(UploadAugFilesOptions),

    /// Download the QR image pair for a project.
    DownloadQr(ProjectTarget),

    /// Copy a session snapshot into the augmentation's snapshot slot.
    SaveSession(SaveSessionOptions),

    /// Print the path of the augmentation's stored session snapshot.
    OpenSession(AugTarget),

    /// Copy the target image out of the cache, downloading it if missing.
    ExportTargetImage(ExportFileOptions),

    /// Copy the model file out of the cache, downloading it if missing.
    ExportModel(ExportFileOptions),

    /// Copy the public QR image out of the cache, downloading it if missing.
    ExportQr(ExportQrOptions),

    /// Export model, target image, and public QR image into one folder.
    ExportAll(ExportAllOptions),

    /// Show slot occupancy and tracking score for an augmentation.
    Status(AugTarget),

    /// Delete local state for projects and augmentations that no longer
    /// exist on Schol-AR.
    CleanLocal(CleanLocalOptions),

    /// Remove a user and every file cached for them.
    RemoveUser(UserTarget),
}

#[derive(Parser, Clone, Debug)]
struct LoginOptions {
    #[arg(value_name = "username")]
    pub username: String,

    /// Token from the Schol-AR account page. Omit to reuse the stored one.
    #[arg(value_name = "api_token")]
    pub api_token: Option<String>,
}

#[derive(Parser, Clone, Debug)]
struct ProjectOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    /// Project category: paper, poster, book, or other.
    #[arg(short, long, value_name = "type", default_value = "other")]
    pub kind: String,

    /// URL of the published work the project belongs to.
    #[arg(short, long, value_name = "url", default_value = "")]
    pub disc_url: String,
}

#[derive(Parser, Clone, Debug)]
struct AugmentationOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    /// Augmentation type. Only "model" is supported.
    #[arg(short, long, value_name = "type", default_value = MODEL_AUGMENTATION)]
    pub kind: String,

    /// Target image to upload right after creation.
    #[arg(long, value_name = "path")]
    pub target_image: Option<PathBuf>,

    /// Model file to upload right after creation.
    #[arg(long, value_name = "path")]
    pub model: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
struct DownloadAugFilesOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    /// Whether to download the target image.
    #[arg(
        long,
        value_name = "bool",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub target_image: bool,

    /// Whether to download the model file.
    #[arg(
        long,
        value_name = "bool",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub model: bool,
}

#[derive(Parser, Clone, Debug)]
struct UploadAugFilesOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    /// Target image to stage into the slot and upload.
    #[arg(long, value_name = "path")]
    pub target_image: Option<PathBuf>,

    /// Model file to stage into the slot and upload.
    #[arg(long, value_name = "path")]
    pub model: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
struct SaveSessionOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    /// Session snapshot file to store.
    #[arg(value_name = "file")]
    pub file: PathBuf,
}

#[derive(Parser, Clone, Debug)]
struct ExportFileOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    #[arg(value_name = "save_location")]
    pub save_location: PathBuf,
}

#[derive(Parser, Clone, Debug)]
struct ExportQrOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "save_location")]
    pub save_location: PathBuf,
}

#[derive(Parser, Clone, Debug)]
struct ExportAllOptions {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,

    #[arg(value_name = "save_folder")]
    pub save_folder: PathBuf,
}

#[derive(Parser, Clone, Debug)]
struct ProjectTarget {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,
}

#[derive(Parser, Clone, Debug)]
struct AugTarget {
    #[arg(value_name = "username")]
    pub username: String,

    #[arg(value_name = "project_title")]
    pub project_title: String,

    #[arg(value_name = "augmentation_title")]
    pub augmentation_title: String,
}

#[derive(Parser, Clone, Debug)]
struct UserTarget {
    #[arg(value_name = "username")]
    pub username: String,
}

#[derive(Parser, Clone, Debug)]
struct CleanLocalOptions {
    /// Target one user. Omit to clean every known user.
    #[arg(value_name = "username")]
    pub username: Option<String>,
}

fn main() {
    let layer = fmt::layer().compact();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry().with(layer).with(filter).init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let remote = RemoteClient::new(&settings)?;
    let base = match &settings.storage.data_dir {
        Some(data_dir) => data_dir.as_path().to_path_buf(),
        None => path::default_cache_dir()?,
    };
    let mut store = CacheStore::new(base, remote);

    cli.run(&mut store, &settings)
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let config_file = match config {
        Some(path) => path.to_path_buf(),
        None => path::default_config_file()?,
    };
    if !config_file.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("failed to read settings file {}", config_file.display()))?;
    let settings = content
        .parse::<Settings>()
        .with_context(|| format!("failed to parse settings file {}", config_file.display()))?;

    Ok(settings)
}

fn run_login(store: &mut CacheStore, opts: LoginOptions) -> Result<()> {
    let LoginOptions { username, api_token } = opts;
    if !valid_input_string(&username) {
        warn!("invalid username, usernames can only contain letters, numbers, and spaces");
        return Ok(());
    }

    store.init_dirs()?;

    let token = match api_token {
        Some(token) => token,
        None => match store.user_token(&username) {
            Ok(token) => token,
            Err(CacheError::UnknownUser(_)) => {
                warn!("user {username} does not exist, pass an API token to create it");
                return Ok(());
            }
            Err(error) => return recover(error),
        },
    };

    match store.validate_token(&token) {
        Ok(true) => {}
        Ok(false) => {
            warn!("invalid API token for user {username}");
            return Ok(());
        }
        Err(error) => return recover(error),
    }

    store.store_user(&username, &token)?;
    if let Err(error) = store.refresh_projects(&username) {
        return recover(error);
    }
    info!("successfully logged into Schol-AR as {username}");

    Ok(())
}

fn run_project(store: &mut CacheStore, opts: ProjectOptions) -> Result<()> {
    let ProjectOptions { username, project_title, kind, disc_url } = opts;
    if !require_user(store, &username)? {
        return Ok(());
    }
    if !valid_input_string(&project_title) {
        warn!("invalid project title, titles can only contain letters, numbers, and spaces");
        return Ok(());
    }
    let kind: ProjectKind = match kind.parse() {
        Ok(kind) => kind,
        Err(error) => {
            warn!("{error}");
            return Ok(());
        }
    };

    if !store.project_exists(&username, &project_title)? {
        match store.create_project(&username, &project_title, kind, &disc_url) {
            Ok(record) => {
                info!("created project {project_title} with QR string {}", record.qr_string);
            }
            Err(error) => return recover(error),
        }
    }

    if let Err(error) = store.refresh_augmentations(&username, &project_title) {
        return recover(error);
    }

    Ok(())
}

fn run_augmentation(
    store: &mut CacheStore,
    settings: &Settings,
    opts: AugmentationOptions,
) -> Result<()> {
    let AugmentationOptions {
        username,
        project_title,
        augmentation_title,
        kind,
        target_image,
        model,
    } = opts;
    if !require_project(store, &username, &project_title)? {
        return Ok(());
    }
    if !valid_input_string(&augmentation_title) {
        warn!("invalid augmentation title, titles can only contain letters, numbers, and spaces");
        return Ok(());
    }
    if kind != MODEL_AUGMENTATION {
        warn!("invalid augmentation type, only {MODEL_AUGMENTATION:?} is supported");
        return Ok(());
    }

    if store.aug_exists(&username, &project_title, &augmentation_title)? {
        // Selecting an existing augmentation just makes sure its slot
        // directories are in place.
        if let Err(error) = store.init_aug_dirs(&username, &project_title, &augmentation_title) {
            return recover(error);
        }
        return Ok(());
    }

    // Refuse oversized files before the augmentation exists remotely, so a
    // failed upload does not leave an empty record behind.
    let limit = settings.service.max_upload_mb;
    for file in [target_image.as_deref(), model.as_deref()].into_iter().flatten() {
        let file = expand_tilde(file);
        if !file.is_file() {
            warn!("no file at {}, could not create new augmentation", file.display());
            return Ok(());
        }
        if !scholsync::cache::slot::within_size_limit(&file, limit) {
            warn!(
                "{} must be smaller than {limit} MB, could not create new augmentation",
                file.display()
            );
            return Ok(());
        }
    }

    match store.create_augmentation(
        &username,
        &project_title,
        &augmentation_title,
        MODEL_AUGMENTATION,
    ) {
        Ok(record) => {
            info!("created augmentation {augmentation_title} with id {}", record.internal_id);
        }
        Err(error) => return recover(error),
    }

    upload_files(store, &username, &project_title, &augmentation_title, target_image, model)
}

fn run_download_aug_files(store: &mut CacheStore, opts: DownloadAugFilesOptions) -> Result<()> {
    let DownloadAugFilesOptions {
        username,
        project_title,
        augmentation_title,
        target_image,
        model,
    } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    if target_image {
        match store.download_target_image(&username, &project_title, &augmentation_title) {
            Ok(Some(path)) => info!("downloaded target image to {}", path.display()),
            Ok(None) => {
                warn!("can't sync because target image for {augmentation_title} not found");
            }
            Err(error) => return recover(error),
        }
    }

    if model {
        match store.download_model(&username, &project_title, &augmentation_title) {
            Ok(Some(path)) => info!("downloaded model file to {}", path.display()),
            Ok(None) => {
                warn!("can't sync because model file for {augmentation_title} not found");
            }
            Err(error) => return recover(error),
        }
    }

    Ok(())
}

fn run_upload_aug_files(store: &mut CacheStore, opts: UploadAugFilesOptions) -> Result<()> {
    let UploadAugFilesOptions {
        username,
        project_title,
        augmentation_title,
        target_image,
        model,
    } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }
    if target_image.is_none() && model.is_none() {
        warn!("nothing to upload, pass --model and/or --target-image");
        return Ok(());
    }

    upload_files(store, &username, &project_title, &augmentation_title, target_image, model)
}

/// Upload any provided files, model first.
///
/// The model must be patched before the target image: the service leaves a
/// target image that was updated right before its model stuck displayed as
/// "processing".
fn upload_files(
    store: &mut CacheStore,
    username: &str,
    project_title: &str,
    augmentation_title: &str,
    target_image: Option<PathBuf>,
    model: Option<PathBuf>,
) -> Result<()> {
    if let Some(file) = model {
        match store.upload_slot_file(
            username,
            project_title,
            augmentation_title,
            &file,
            UploadField::ModelFile,
        ) {
            Ok(path) => info!("uploaded model file {}", path.display()),
            Err(error) => return recover(error),
        }
    }

    if let Some(file) = target_image {
        match store.upload_slot_file(
            username,
            project_title,
            augmentation_title,
            &file,
            UploadField::TargetImage,
        ) {
            Ok(path) => info!("uploaded target image {}", path.display()),
            Err(error) => return recover(error),
        }
    }

    Ok(())
}

fn run_download_qr(store: &mut CacheStore, opts: ProjectTarget) -> Result<()> {
    let ProjectTarget { username, project_title } = opts;
    if !require_project(store, &username, &project_title)? {
        return Ok(());
    }

    match store.download_qr(&username, &project_title) {
        Ok((public, admin)) => {
            info!("downloaded public QR image to {}", public.display());
            info!("downloaded admin QR image to {}", admin.display());
        }
        Err(error) => return recover(error),
    }

    Ok(())
}

fn run_save_session(store: &mut CacheStore, opts: SaveSessionOptions) -> Result<()> {
    let SaveSessionOptions { username, project_title, augmentation_title, file } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    let file = expand_tilde(&file);
    if !file.is_file() {
        warn!("no session snapshot at {}", file.display());
        return Ok(());
    }

    let result = store
        .aug_session_dir(&username, &project_title, &augmentation_title)
        .and_then(|dir| store.stage_into_slot(&dir, &file));
    match result {
        Ok(path) => info!("saved session snapshot to {}", path.display()),
        Err(error) => return recover(error),
    }

    Ok(())
}

fn run_open_session(store: &mut CacheStore, opts: AugTarget) -> Result<()> {
    let AugTarget { username, project_title, augmentation_title } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    match store.session_path(&username, &project_title, &augmentation_title) {
        Ok(Some(path)) => println!("{}", path.display()),
        Ok(None) => info!("no session file yet for augmentation {augmentation_title}"),
        Err(error) => return recover(error),
    }

    Ok(())
}

fn run_export_target_image(store: &mut CacheStore, opts: ExportFileOptions) -> Result<()> {
    let ExportFileOptions { username, project_title, augmentation_title, save_location } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    export_target_image(store, &username, &project_title, &augmentation_title, save_location)
}

fn run_export_model(store: &mut CacheStore, opts: ExportFileOptions) -> Result<()> {
    let ExportFileOptions { username, project_title, augmentation_title, save_location } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    export_model(store, &username, &project_title, &augmentation_title, save_location)
}

fn run_export_qr(store: &mut CacheStore, opts: ExportQrOptions) -> Result<()> {
    let ExportQrOptions { username, project_title, save_location } = opts;
    if !require_project(store, &username, &project_title)? {
        return Ok(());
    }

    export_qr(store, &username, &project_title, save_location)
}

fn run_export_all(store: &mut CacheStore, opts: ExportAllOptions) -> Result<()> {
    let ExportAllOptions { username, project_title, augmentation_title, save_folder } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    fs::create_dir_all(&save_folder)
        .with_context(|| format!("failed to create {}", save_folder.display()))?;

    // Augmentation titles name the exported files; the QR image borrows the
    // project title because the QR identifier itself means nothing to a
    // reader.
    let safe_title = sanitize_filename(&augmentation_title);
    export_model(
        store,
        &username,
        &project_title,
        &augmentation_title,
        save_folder.join(format!("{safe_title}.glb")),
    )?;
    export_target_image(
        store,
        &username,
        &project_title,
        &augmentation_title,
        save_folder.join(format!("{safe_title}.png")),
    )?;
    export_qr(
        store,
        &username,
        &project_title,
        save_folder.join(format!("{project_title}_qr.png")),
    )
}

fn export_target_image(
    store: &mut CacheStore,
    username: &str,
    project_title: &str,
    augmentation_title: &str,
    save_location: PathBuf,
) -> Result<()> {
    let mut path = match store.target_image_path(username, project_title, augmentation_title) {
        Ok(path) => path,
        Err(error) => return recover(error),
    };
    if path.is_none() {
        path = match store.download_target_image(username, project_title, augmentation_title) {
            Ok(path) => path,
            Err(error) => return recover(error),
        };
    }

    match path {
        Some(src) => copy_export(&src, save_location, "png"),
        None => {
            warn!("no target image available for {augmentation_title}");
            Ok(())
        }
    }
}

fn export_model(
    store: &mut CacheStore,
    username: &str,
    project_title: &str,
    augmentation_title: &str,
    save_location: PathBuf,
) -> Result<()> {
    let mut path = match store.model_path(username, project_title, augmentation_title) {
        Ok(path) => path,
        Err(error) => return recover(error),
    };
    if path.is_none() {
        path = match store.download_model(username, project_title, augmentation_title) {
            Ok(path) => path,
            Err(error) => return recover(error),
        };
    }

    match path {
        Some(src) => copy_export(&src, save_location, "glb"),
        None => {
            warn!("no model file available for {augmentation_title}");
            Ok(())
        }
    }
}

fn export_qr(
    store: &mut CacheStore,
    username: &str,
    project_title: &str,
    save_location: PathBuf,
) -> Result<()> {
    let mut path = match store.qr_file(username, project_title, false) {
        Ok(path) => path,
        Err(error) => return recover(error),
    };
    if path.is_none() {
        path = match store.download_qr(username, project_title) {
            Ok((public, _admin)) => Some(public),
            Err(error) => return recover(error),
        };
    }

    match path {
        Some(src) => copy_export(&src, save_location, "png"),
        None => {
            warn!("no QR image available for {project_title}");
            Ok(())
        }
    }
}

fn copy_export(src: &Path, dest: PathBuf, extension: &str) -> Result<()> {
    let dest = format_file_extension(dest, extension);
    fs::copy(src, &dest)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))?;
    info!("exported {} to {}", src.display(), dest.display());

    Ok(())
}

fn run_status(store: &mut CacheStore, opts: AugTarget) -> Result<()> {
    let AugTarget { username, project_title, augmentation_title } = opts;
    if !require_augmentation(store, &username, &project_title, &augmentation_title)? {
        return Ok(());
    }

    let record = match store.find_augmentation(&username, &project_title, &augmentation_title) {
        Ok(record) => record,
        Err(error) => return recover(error),
    };

    let slot_line = |name: &str, path: Option<PathBuf>| match path {
        Some(path) => println!("{name}: {}", path.display()),
        None => println!("{name}: empty"),
    };
    slot_line(
        "target image",
        store.target_image_path(&username, &project_title, &augmentation_title)?,
    );
    slot_line("model", store.model_path(&username, &project_title, &augmentation_title)?);
    slot_line("session", store.session_path(&username, &project_title, &augmentation_title)?);

    match (record.tracking_stars(), record.tracking_score) {
        (Some(stars), Some(score)) if score < 30.0 => {
            println!(
                "tracking score: {stars}/5 (image tracking may be acceptable but could be improved)"
            );
        }
        (Some(stars), _) => println!("tracking score: {stars}/5"),
        _ => println!("tracking score: still processing, refresh in a moment"),
    }

    Ok(())
}

fn run_clean_local(store: &mut CacheStore, opts: CleanLocalOptions) -> Result<()> {
    let targets = match opts.username {
        Some(username) => {
            if !require_user(store, &username)? {
                return Ok(());
            }
            vec![username]
        }
        None => store.list_usernames()?,
    };

    for username in targets {
        match store.clean_local(&username) {
            Ok(CleanOutcome::Pruned { removed }) => {
                info!("cleaned local cache for {username}, removed {removed} orphaned directories");
            }
            Ok(CleanOutcome::SkippedInvalidToken) => {}
            Err(error) => recover(error)?,
        }
    }

    Ok(())
}

fn run_remove_user(store: &mut CacheStore, opts: UserTarget) -> Result<()> {
    match store.remove_user(&opts.username) {
        Ok(()) => info!("user {} removed", opts.username),
        Err(CacheError::UnknownUser(_)) => {
            warn!("can't remove user {} because it was not found", opts.username);
        }
        Err(error) => return recover(error),
    }

    Ok(())
}

/// Downgrade an expected failure to a warning, escalate everything else.
///
/// Rejected or unreachable remote calls and not-found lookups abort the
/// operation with a warning and a clean exit, because the user can act on
/// them. Server faults and filesystem errors bubble up to a non-zero exit.
fn recover(error: CacheError) -> Result<()> {
    if error.is_recoverable() {
        warn!("{error}");
        return Ok(());
    }

    Err(error.into())
}

fn require_user(store: &CacheStore, username: &str) -> Result<bool> {
    if !store.username_exists(username)? {
        warn!("user {username} not found");
        return Ok(false);
    }

    Ok(true)
}

fn require_project(store: &CacheStore, username: &str, project_title: &str) -> Result<bool> {
    if !require_user(store, username)? {
        return Ok(false);
    }
    if !store.project_exists(username, project_title)? {
        warn!("project {project_title} not found");
        return Ok(false);
    }

    Ok(true)
}

fn require_augmentation(
    store: &CacheStore,
    username: &str,
    project_title: &str,
    augmentation_title: &str,
) -> Result<bool> {
    if !require_project(store, username, project_title)? {
        return Ok(false);
    }
    if !store.aug_exists(username, project_title, augmentation_title)? {
        warn!("augmentation {augmentation_title} not found");
        return Ok(false);
    }

    Ok(true)
}

/// Validate that an input string has only letters, numbers, and spaces.
fn valid_input_string(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_alphanumeric() || c == ' ')
}

/// Append a file extension unless the path already carries it.
fn format_file_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == extension) {
        return path;
    }

    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(extension);

    PathBuf::from(raw)
}

/// Expand a leading `~` in a user-supplied path.
fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
