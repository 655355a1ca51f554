use crate::config::MissingPlaceholder;
use crate::placeholder::PLACEHOLDER_PATTERN;
use crate::substitute::{Outcome, substitute};
use crate::{ReplaceError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// One invocation: template and replacement in, output file out.
#[derive(Debug, Clone)]
pub struct ReplaceJob {
    pub template: PathBuf,
    pub replacement: PathBuf,
    pub output: PathBuf,
}

impl ReplaceJob {
    pub fn new(
        template: impl Into<PathBuf>,
        replacement: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template: template.into(),
            replacement: replacement.into(),
            output: output.into(),
        }
    }

    /// Read both inputs, substitute the placeholder and write the output.
    ///
    /// A template without a placeholder prints a diagnostic on stdout. Under
    /// [`MissingPlaceholder::Continue`] the template is then written through
    /// unchanged; under [`MissingPlaceholder::Fail`] nothing is written and
    /// [`ReplaceError::PlaceholderNotFound`] is returned.
    ///
    /// # Errors
    ///
    /// * `ReplaceError::Read` - either input could not be read
    /// * `ReplaceError::Write` - the output could not be created or written
    #[instrument(skip(self), fields(template = %self.template.display(), output = %self.output.display()))]
    pub fn run(&self, on_missing: MissingPlaceholder) -> Result<Outcome> {
        let template = read_input(&self.template)?;
        let replacement = read_input(&self.replacement)?;

        let substitution = substitute(&template, &replacement);

        match &substitution.outcome {
            Outcome::NotFound => {
                println!("Could not find regex '{}' in template file", PLACEHOLDER_PATTERN);
                if on_missing == MissingPlaceholder::Fail {
                    return Err(ReplaceError::PlaceholderNotFound {
                        pattern: PLACEHOLDER_PATTERN.to_string(),
                        path: self.template.clone(),
                    });
                }
                warn!("no placeholder found, copying template unchanged");
            }
            Outcome::Replaced {
                line, remaining, ..
            } => {
                if *remaining > 0 {
                    warn!(remaining, "only the first placeholder is replaced");
                }
                info!(line, "placeholder replaced");
            }
        }

        fs::write(&self.output, &substitution.text)
            .map_err(|e| ReplaceError::write(&self.output, e))?;
        debug!(bytes = substitution.text.len(), "output written");

        Ok(substitution.outcome)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let content = fs::read(path).map_err(|e| ReplaceError::read(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "read input");
    Ok(content)
}
