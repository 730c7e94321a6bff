// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn explicit_path_is_joined_to_dir() {
    let dir = Path::new("/work");
    assert_eq!(locate_config(dir, Some(Path::new("ci/dvbx.yml"))), PathBuf::from("/work/ci/dvbx.yml"));
    assert_eq!(locate_config(dir, Some(Path::new("/etc/dvbx.yml"))), PathBuf::from("/etc/dvbx.yml"));
}

#[test]
fn falls_back_to_default_name() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(locate_config(dir.path(), None), dir.path().join("dvbx.yml"));
}

#[test]
fn first_existing_candidate_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dvbx.toml"), "name = \"a\"").unwrap();
    std::fs::write(dir.path().join("dvbx.json"), "{}").unwrap();
    assert_eq!(locate_config(dir.path(), None), dir.path().join("dvbx.json"));
}
