//! Interactive size/zoom prompt.

use std::io::{BufRead, Write};

use super::{parse_zoom, ConfigError, ImageSize, MapConfig};

const SIZE_PROMPT: &str =
    "Enter image size (WIDTHxHEIGHT, e.g. 300x450), or '5k', '4k', '2k' (2560x1440), '1k' (1920x1080)";
const ZOOM_PROMPT: &str = "Enter zoom level (1-5000)";

/// Asks for the image size and zoom on `output`, reading answers from `input`.
///
/// An empty answer (or end of input) keeps the value already in `config`.
/// Malformed answers are errors; the caller aborts the run.
pub fn prompt_size_and_zoom<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &mut MapConfig,
) -> Result<(), ConfigError> {
    if let Some(answer) = ask(input, output, SIZE_PROMPT, &config.size.to_string())? {
        config.size = answer.parse::<ImageSize>()?;
    }
    if let Some(answer) = ask(input, output, ZOOM_PROMPT, &config.zoom.to_string())? {
        config.zoom = parse_zoom(&answer)?;
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    current: &str,
) -> Result<Option<String>, ConfigError> {
    write!(output, "{} [{}]: ", prompt, current).map_err(ConfigError::Prompt)?;
    output.flush().map_err(ConfigError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(ConfigError::Prompt)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str) -> (Result<(), ConfigError>, MapConfig, String) {
        let mut config = MapConfig::default();
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_size_and_zoom(&mut input, &mut output, &mut config);
        (result, config, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_reads_size_and_zoom() {
        let (result, config, shown) = run("300x450\n1200\n");
        assert!(result.is_ok());
        assert_eq!(config.size, ImageSize::new(300, 450));
        assert_eq!(config.zoom, 1200.0);
        assert!(shown.contains("Enter image size"));
        assert!(shown.contains("Enter zoom level"));
    }

    #[test]
    fn test_prompt_accepts_presets() {
        let (result, config, _) = run("2k\n50\n");
        assert!(result.is_ok());
        assert_eq!(config.size, ImageSize::new(2560, 1440));
        assert_eq!(config.zoom, 50.0);
    }

    #[test]
    fn test_empty_answers_keep_defaults() {
        let (result, config, shown) = run("\n\n");
        assert!(result.is_ok());
        assert_eq!(config, MapConfig::default());
        assert!(shown.contains("[5120x2880]"));
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let (result, config, _) = run("");
        assert!(result.is_ok());
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_malformed_answers_are_errors() {
        let (result, _, _) = run("huge\n10\n");
        assert!(matches!(result, Err(ConfigError::InvalidSize(_))));

        let (result, _, _) = run("1k\n0\n");
        assert!(matches!(result, Err(ConfigError::InvalidZoom(_))));

        let (result, _, _) = run("1k\nfar\n");
        assert!(matches!(result, Err(ConfigError::InvalidZoomInput(_))));
    }
}
