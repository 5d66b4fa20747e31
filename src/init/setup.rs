use crate::{err::Error, init::settings::Settings};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tokio::{fs, io};
use tracing::{info, warn};

pub struct Resources {
    pub address: SocketAddr,
    pub public_dir: PathBuf,
}

pub async fn setup(settings: &Settings) -> Result<Resources, Error> {
    let address = settings.listen_address()?;

    let public_dir = PathBuf::from(&settings.public_dir);
    if let Err(e) = setup_public_dir(&public_dir).await {
        // Static files are optional, the API works without them.
        warn!("Error setting up public dir {}: {}", public_dir.display(), e);
    }

    info!("Setup complete.");
    Ok(Resources {
        address,
        public_dir,
    })
}

// Creates the public directory and the default stylesheet if they don't exist.
// Existing files are left untouched so they can be customised.
pub async fn setup_public_dir(public_dir: &Path) -> Result<(), io::Error> {
    fs::create_dir_all(public_dir).await?;

    let style_path = public_dir.join("style.css");
    if !fs::try_exists(&style_path).await? {
        info!("Writing default stylesheet to {}", style_path.display());
        let style_css = std::include_str!("../../css/style.css");
        fs::write(&style_path, style_css).await?;
    }

    Ok(())
}
