//! Line-oriented `bamrc` configuration format
//!
//! ```text
//! # Sources
//! source docs /home/me/docs/
//! i *.tmp
//! c .git/*
//!
//! # Profiles
//! [/mnt/backup]
//! + docs -> documents
//! ```
//!
//! | directive                 | meaning                                        |
//! |---------------------------|------------------------------------------------|
//! | `source <name> <path>`    | declare a source                               |
//! | `i <pattern>`             | exclude pattern for the last declared source   |
//! | `c <pattern>`             | collapse pattern for the last declared source  |
//! | `[<destination>]`         | start a profile rooted at `<destination>`      |
//! | `+ <source> <sep> <path>` | mirror `<source>` to `<destination>/<path>`    |
//!
//! Tokens are whitespace separated. Lines starting with `#` and blank
//! lines are ignored. Anything else is an error: a mistyped exclude line
//! must not silently widen what gets deleted.

use std::path::Path;

use super::{MirrorConfig, Profile, Source, Target};
use crate::{Error, Result};

/// Parse `bamrc` content. `path` is used for error messages only.
pub fn parse(content: &str, path: &Path) -> Result<MirrorConfig> {
    let mut config = MirrorConfig::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fail = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let expect = |count: usize, usage: &str| {
            if tokens.len() == count {
                Ok(())
            } else {
                Err(fail(format!("expected '{usage}'")))
            }
        };

        match tokens[0] {
            "source" => {
                expect(3, "source <name> <path>")?;
                if config.source(tokens[1]).is_some() {
                    return Err(fail(format!("duplicate source '{}'", tokens[1])));
                }
                config.sources.push(Source::new(tokens[1], tokens[2]));
            }
            directive @ ("i" | "c") => {
                expect(2, &format!("{directive} <pattern>"))?;
                let source = config.sources.last_mut().ok_or_else(|| {
                    fail(format!("'{directive}' before any 'source' line"))
                })?;
                let patterns = if directive == "i" {
                    &mut source.exclude
                } else {
                    &mut source.collapse
                };
                patterns.push(tokens[1].to_string());
            }
            "+" => {
                expect(4, "+ <source> -> <path>")?;
                if config.source(tokens[1]).is_none() {
                    return Err(fail(format!("unknown source '{}'", tokens[1])));
                }
                let profile = config
                    .profiles
                    .last_mut()
                    .ok_or_else(|| fail("'+' before any '[destination]' line".to_string()))?;
                profile.targets.push(Target {
                    source: tokens[1].to_string(),
                    path: tokens[3].to_string(),
                });
            }
            header if header.len() > 2 && header.starts_with('[') && header.ends_with(']') => {
                expect(1, "[<destination>]")?;
                let destination = &header[1..header.len() - 1];
                if config.profiles.iter().any(|p| p.destination == destination) {
                    return Err(fail(format!("duplicate profile '{destination}'")));
                }
                config.profiles.push(Profile::new(destination));
            }
            other => return Err(fail(format!("unknown directive '{other}'"))),
        }
    }

    Ok(config)
}
