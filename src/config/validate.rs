//! configuration validation stuff
use crate::{config::options::*, error::Result, validator, validator_nested};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of: trace, debug, info, warn, error, off";
}

validator! { ScanConfig,
    max_file_size => |v: &u64| *v > 0,
        "must be greater than 0";
    threads => |v: &usize| *v >= 1 && *v <= 256,
        "must be between 1 and 256";
}

validator! { OutputConfig,
    path => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

/// characters a separator can't be, since they already mean something in a token
const RESERVED_SEPARATOR_CHARS: &[char] = &['-', '[', ']', '(', ')', '!', '/', '\\', '.'];

validator_nested! { BreezeConfig,
    fields: {
        content => |v: &Vec<String>| v.iter().all(|p| !p.trim().is_empty() && p.trim() != "!"),
            "patterns must not be empty";
        plugins => |v: &Vec<String>| v.iter().all(|p| !p.trim().is_empty()),
            "plugin names must not be empty";
        separator => |v: &char| {
            !v.is_alphanumeric() && !v.is_whitespace() && !RESERVED_SEPARATOR_CHARS.contains(v)
        },
            "must be punctuation other than - [ ] ( ) ! / \\ .";
        prefix => |v: &String| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "must only contain letters, digits, - and _";
    }
    nested: {
        output;
        scan;
        logging;
    }
}

/// format validation errors for display
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::new();
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_errors_are_prefixed() {
        let cfg = BreezeConfig {
            scan: Some(ScanConfig {
                max_file_size: Some(0),
                threads: None,
            }),
            ..Default::default()
        };

        assert_eq!(
            cfg.validate().unwrap_err(),
            vec!["scan.max_file_size: must be greater than 0".to_string()]
        );
    }

    #[test]
    fn test_separator_rules() {
        for (separator, valid) in [(':', true), ('_', true), ('|', true), ('-', false), ('a', false)] {
            let cfg = BreezeConfig {
                separator: Some(separator),
                ..Default::default()
            };
            assert_eq!(cfg.is_valid(), valid, "separator {:?}", separator);
        }
    }

    #[test]
    fn test_format_validation_errors() {
        let formatted = format_validation_errors(&["a: x".to_string(), "b: y".to_string()]);
        assert_eq!(formatted, "  1. a: x\n  2. b: y\n");
    }
}
