use super::*;

use std::collections::HashSet;
use std::fs;

use rom_covers_core::{Platform, PlatformEntry, PlatformTable};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"rom").unwrap();
}

#[test]
fn one_item_per_matching_file() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "mario.nes");
    touch(dir.path(), "zelda.smc");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "cover.png");

    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();

    // Set membership only — ordering across runs is implementation-defined
    let found: HashSet<(Platform, &str)> = items
        .iter()
        .map(|i| (i.platform, i.name.as_str()))
        .collect();
    assert_eq!(items.len(), 2);
    assert!(found.contains(&(Platform::Nes, "mario")));
    assert!(found.contains(&(Platform::Snes, "zelda")));
}

#[test]
fn name_is_filename_without_extension() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Super Mario Bros. (USA).nes");

    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Super Mario Bros. (USA)");
    assert_eq!(
        items[0].source_path,
        dir.path().join("Super Mario Bros. (USA).nes")
    );
}

#[test]
fn matching_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "DUCK.NES");

    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].platform, Platform::Nes);
    assert_eq!(items[0].name, "DUCK");
}

#[test]
fn scan_is_not_recursive() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "mario.nes");
    fs::create_dir(dir.path().join("more")).unwrap();
    touch(&dir.path().join("more"), "hidden.nes");

    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "mario");
}

#[test]
fn custom_table_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "game.rom");
    touch(dir.path(), "zelda.smc");

    let table = PlatformTable::new(vec![PlatformEntry::new(Platform::Nes, &["rom"])]);
    let items = scan_rom_items(dir.path(), &table).unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].platform, Platform::Nes);
    assert_eq!(items[0].name, "game");
}

#[test]
fn indices_follow_emission_order() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.nes");
    touch(dir.path(), "b.nes");
    touch(dir.path(), "c.smc");

    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();
    let indices: Vec<usize> = items.iter().map(|i| i.index).collect();
    assert_eq!(indices, (0..items.len()).collect::<Vec<_>>());
}

#[test]
fn unreadable_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let result = scan_rom_items(&missing, &PlatformTable::default());
    assert!(result.is_err());
}

#[test]
fn empty_directory_yields_no_items() {
    let dir = tempfile::tempdir().unwrap();
    let items = scan_rom_items(dir.path(), &PlatformTable::default()).unwrap();
    assert!(items.is_empty());
}
