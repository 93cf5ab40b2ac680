//! Per-command behaviour.
//!
//! Each handler validates its argument, performs one filesystem operation
//! through the [`Navigator`], writes the human-readable outcome to `out` and
//! returns whether the command was accepted (and therefore audited).

use crate::navigator::Navigator;
use std::fs::{self, File};
use std::io::{self, Write};

pub(crate) fn ls(nav: &Navigator, out: &mut dyn Write) -> io::Result<bool> {
    match fs::read_dir(nav.resolve()) {
        Ok(read_dir) => {
            let mut names: Vec<String> = read_dir
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();

            if names.is_empty() {
                writeln!(out, "No files or directories found.")?;
            }
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        Err(_) => writeln!(out, "Directory not found.")?,
    }
    // ls is recorded even when the directory vanished underneath us
    Ok(true)
}

pub(crate) fn cd(nav: &mut Navigator, arg: Option<&str>, out: &mut dyn Write) -> io::Result<bool> {
    let Some(target) = arg else {
        writeln!(out, "Usage: cd <directory>")?;
        return Ok(false);
    };

    match nav.cd(target) {
        Ok(()) => Ok(true),
        Err(_) => {
            writeln!(out, "Directory not found.")?;
            Ok(false)
        }
    }
}

pub(crate) fn touch(nav: &Navigator, arg: Option<&str>, out: &mut dyn Write) -> io::Result<bool> {
    let Some(name) = arg else {
        writeln!(out, "Usage: touch <file_name>")?;
        return Ok(false);
    };

    let created = nav
        .resolve_entry(name)
        .and_then(|path| File::create(path).map_err(Into::into));
    match created {
        Ok(_) => {
            writeln!(out, "File '{}' created.", name)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "Error creating file: {}", e)?;
            Ok(false)
        }
    }
}

pub(crate) fn rmdir(nav: &Navigator, arg: Option<&str>, out: &mut dyn Write) -> io::Result<bool> {
    let Some(name) = arg else {
        writeln!(out, "Usage: rmdir <directory>")?;
        return Ok(false);
    };

    let path = match nav.resolve_entry(name) {
        Ok(path) if is_real_dir(&path) => path,
        _ => {
            writeln!(out, "Error: Directory not found.")?;
            return Ok(false);
        }
    };

    let removed = fs::read_dir(&path).and_then(|mut children| {
        if children.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(&path).map(|()| true)
    });

    match removed {
        Ok(false) => {
            writeln!(out, "Error: Directory is not empty.")?;
            Ok(false)
        }
        Ok(true) => {
            writeln!(out, "Directory '{}' removed.", name)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            Ok(false)
        }
    }
}

pub(crate) fn rev(nav: &Navigator, arg: Option<&str>, out: &mut dyn Write) -> io::Result<bool> {
    let Some(name) = arg else {
        writeln!(out, "Usage: rev <file_path>")?;
        return Ok(false);
    };

    let path = match nav.resolve_entry(name) {
        Ok(path) if path.is_file() => path,
        _ => {
            writeln!(out, "Error: File '{}' not found.", name)?;
            return Ok(false);
        }
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            let reversed: String = content.chars().rev().collect();
            writeln!(out)?;
            writeln!(out, "Reversed content:")?;
            writeln!(out)?;
            writeln!(out, "{}", reversed)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "Error reading file '{}': {}", name, e)?;
            Ok(false)
        }
    }
}

fn is_real_dir(path: &std::path::Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
