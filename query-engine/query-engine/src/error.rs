use query_core::CoreError;
use request_handlers::HandlerError;
use sdl_ast::SchemaError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::dispatcher::SetGlobalDefaultError;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("{}", _0)]
    Schema(#[from] SchemaError),

    #[error("{}", _0)]
    Core(#[from] CoreError),

    #[error("{}", _0)]
    Handler(#[from] HandlerError),

    #[error("Could not read `{}`: {}", path.display(), source)]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}", _0)]
    JsonDecode(#[from] serde_json::Error),

    #[error("{}", _0)]
    Logger(#[from] SetGlobalDefaultError),
}

#[derive(serde::Serialize)]
struct RenderedError<'a> {
    message: &'a str,
}

impl BindingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Writes the error to stderr as a single JSON line.
    pub fn render_as_json(&self) -> Result<(), std::io::Error> {
        use std::io::Write as _;

        let message = self.to_string();

        let stderr = std::io::stderr();
        let mut writer = std::io::LineWriter::new(stderr.lock());
        serde_json::to_writer(&mut writer, &RenderedError { message: &message })?;
        writeln!(&mut writer)?;
        writer.flush()
    }
}
