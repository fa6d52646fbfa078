//! Filesystem Certificate Store
//!
//! Saved certificates live at `<dir>/<session id>/<file name>`. File names
//! must be a single path component; anything else is refused before
//! touching disk.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use kernel::id::FormSessionId;

use crate::domain::gateway::CertificateStore;
use crate::error::{SignupError, SignupResult};

#[derive(Debug, Clone)]
pub struct FsCertificateStore {
    dir: PathBuf,
}

impl FsCertificateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_dir(&self, session_id: &FormSessionId) -> PathBuf {
        self.dir.join(session_id.to_string())
    }

    fn path_for(&self, session_id: &FormSessionId, file_name: &str) -> SignupResult<PathBuf> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == file_name => {
                Ok(self.session_dir(session_id).join(name))
            }
            _ => Err(SignupError::InvalidFileName),
        }
    }
}

impl CertificateStore for FsCertificateStore {
    async fn save(
        &self,
        session_id: &FormSessionId,
        file_name: &str,
        bytes: &[u8],
    ) -> SignupResult<()> {
        let path = self.path_for(session_id, file_name)?;
        tokio::fs::create_dir_all(self.session_dir(session_id)).await?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Certificate saved");
        Ok(())
    }

    async fn load(
        &self,
        session_id: &FormSessionId,
        file_name: &str,
    ) -> SignupResult<Option<Vec<u8>>> {
        let path = self.path_for(session_id, file_name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
