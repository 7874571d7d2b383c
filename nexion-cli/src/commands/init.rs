//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../nexion.yml.example");

/// Initialize a new Nexion docs project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_docs(root)?;

    println!("✓ nexion initialized in {:?}", root);
    println!("  - Edit nexion.yml to customize site metadata");
    println!("  - Write documents in docs/ (the file name becomes the slug)");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("nexion.yml");
    if config_path.exists() {
        println!("nexion.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_docs(root: &Path) -> Result<()> {
    let docs = root.join("docs");
    fs::create_dir_all(&docs).with_context(|| format!("Failed to create {:?}", docs))?;

    let sample = docs.join("getting-started.md");
    if !sample.exists() {
        fs::write(&sample, sample_doc())
            .with_context(|| format!("Failed to write {:?}", sample))?;
        println!("Created {:?}", sample);
    }
    Ok(())
}

fn sample_doc() -> &'static str {
    r#"---
title: Getting Started
description: Set up Nexion in a few minutes
---

# Getting Started

Welcome to Nexion. Every document in `docs/` is listed in the sidebar and
addressed by its file name.

## Install

```bash
nexion docs list
nexion docs toc getting-started
```

## Next steps

Add more documents next to this one and run `nexion verify`.
"#
}
