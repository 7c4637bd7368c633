use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use crate::error::SessionError;

/// Output sink for the received bytes. Created for exclusive writing,
/// truncating any previous content, owner read/write only.
pub struct Stream {
    file: File,
}

impl Stream {
    pub async fn create(path: &Path) -> crate::error::Result<Stream> {
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        match options.open(path).await {
            Ok(file) => {
                Ok(Stream {
                    file,
                })
            }
            Err(e) => {
                Err(SessionError::CreateOutput(e.to_string()))
            }
        }
    }

    pub async fn write_async(&mut self, buffer: &[u8]) -> crate::error::Result<()> {
        if let Err(_e) = self.file.write_all(buffer).await {
            return Err(SessionError::FileWrite);
        }

        Ok(())
    }

    pub async fn flush_async(&mut self) -> crate::error::Result<()> {
        if let Err(_e) = self.file.flush().await {
            return Err(SessionError::FileFlush);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::stream::Stream;

    #[tokio::test]
    async fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"previous contents").unwrap();

        let mut stream = Stream::create(&path).await.unwrap();
        stream.write_async(b"new").await.unwrap();
        stream.flush_async().await.unwrap();
        drop(stream);

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_create_restricts_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.bin");
        let _stream = Stream::create(&path).await.unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_create_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        assert!(Stream::create(&path).await.is_err());
    }
}
