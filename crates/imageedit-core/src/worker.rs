//! Running blocking session work on the tokio blocking pool.
//!
//! Decoding and exporting are CPU and disk bound. Async hosts hand the
//! owned inputs (an [`ExportJob`](crate::session::ExportJob), a locator)
//! to these helpers and feed the result back into the session with
//! `finish_export` / `finish_load`.

use tokio::task;

use crate::decode::DecodedImage;
use crate::export::Locator;
use crate::platform::ImageSource;
use crate::session::SessionError;

/// Run `work` on the blocking pool.
pub async fn run_blocking<T, E, F>(work: F) -> Result<T, SessionError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<SessionError> + Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| SessionError::Worker(format!("Task join error: {e}")))?
        .map_err(Into::into)
}

/// Decode `locator` with `source` on the blocking pool.
pub async fn decode_in_background<S>(source: S, locator: Locator) -> Result<DecodedImage, SessionError>
where
    S: ImageSource + Send + 'static,
{
    run_blocking(move || source.decode(&locator)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::encode::encode_png;
    use crate::platform::FsImageSource;
    use crate::session::EditorSession;

    #[tokio::test]
    async fn test_export_job_on_worker() {
        let mut session = EditorSession::new(EditorConfig::default());
        session.load_image(DecodedImage::filled(64, 48, [1, 2, 3, 255]));

        let job = session.begin_confirm().unwrap();
        let outcome = run_blocking(move || job.render()).await;
        let image = session.finish_export(outcome).unwrap();
        assert_eq!((image.width, image.height), (64, 48));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_background_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, encode_png(&DecodedImage::filled(8, 4, [5, 5, 5, 255])).unwrap()).unwrap();
        let locator = Locator::from_path(&path);

        let mut session = EditorSession::new(EditorConfig::default());
        session.begin_load(&locator);
        assert!(session.is_loading());
        let decoded = decode_in_background(FsImageSource, locator.clone()).await;
        session.finish_load(locator, decoded).unwrap();
        assert!(!session.is_loading());
        assert_eq!(session.image().map(|i| (i.width, i.height)), Some((8, 4)));
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let outcome: Result<(), SessionError> =
            run_blocking(|| -> Result<(), SessionError> { panic!("boom") }).await;
        assert!(matches!(outcome, Err(SessionError::Worker(_))));
    }
}
