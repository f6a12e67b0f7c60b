//! `benchforge sections`: show the section map a conversion would use.

use std::path::Path;

use anyhow::Result;
use benchforge_config::{locate_catalog, resolve_section_map, DEFAULT_FAMILY};

use crate::terminal_output::{note_info, render_section_map};

pub async fn run(family: Option<&str>, sections: Option<&Path>, json: bool) -> Result<()> {
    let family = family.unwrap_or(DEFAULT_FAMILY);
    let map = resolve_section_map(sections, family).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let source = locate_catalog(sections);
    match source.path() {
        Some(path) => note_info(&format!("Catalog: {}", path.display())),
        None => note_info("Catalog: built-in"),
    }
    note_info(&format!("Family: {} ({} sections)", map.family(), map.len()));
    print!("{}", render_section_map(&map));
    Ok(())
}
