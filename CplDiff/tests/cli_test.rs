#![cfg(feature = "cli")]

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn cpl(edit_rate: &str, resources: &[(u64, u64, &str)]) -> String {
    let resources: String = resources
        .iter()
        .map(|(entry_point, duration, id)| {
            format!(
                "<Resource><EntryPoint>{entry_point}</EntryPoint>\
                 <SourceDuration>{duration}</SourceDuration>\
                 <TrackFileId>{id}</TrackFileId></Resource>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<CompositionPlaylist xmlns="http://www.smpte-ra.org/schemas/2067-3/2013"
    xmlns:cc="http://www.smpte-ra.org/schemas/2067-2/2013">
  <EditRate>{edit_rate}</EditRate>
  <SegmentList>
    <Segment>
      <SequenceList>
        <cc:MainImageSequence>
          <TrackId>urn:uuid:image</TrackId>
          <ResourceList>{resources}</ResourceList>
        </cc:MainImageSequence>
      </SequenceList>
    </Segment>
  </SegmentList>
</CompositionPlaylist>"#
    )
}

fn run(old: &Path, new: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cpldiff"))
        .arg(old)
        .arg(new)
        .output()
        .unwrap()
}

#[test]
fn test_prints_opcodes() {
    let dir = tempdir().unwrap();
    let old = dir.path().join("old.xml");
    let new = dir.path().join("new.xml");
    fs::write(&old, cpl("24 1", &[(0, 4, "r1")])).unwrap();
    fs::write(&new, cpl("24 1", &[(0, 2, "r1"), (3, 1, "r1")])).unwrap();

    let output = run(&old, &new);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "equal   [0:2] --> [0:2]\ndelete  [2:3] --> [2:2]\nequal   [3:4] --> [2:3]\n"
    );
}

#[test]
fn test_edit_rate_mismatch_exits_with_failure() {
    let dir = tempdir().unwrap();
    let old = dir.path().join("old.xml");
    let new = dir.path().join("new.xml");
    fs::write(&old, cpl("24000 1001", &[(0, 2, "r1")])).unwrap();
    fs::write(&new, cpl("25", &[(0, 2, "r1")])).unwrap();

    let output = run(&old, &new);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("do not have identical edit rates"));
}

#[test]
fn test_missing_file_exits_with_failure() {
    let dir = tempdir().unwrap();
    let old = dir.path().join("old.xml");
    fs::write(&old, cpl("24 1", &[(0, 2, "r1")])).unwrap();

    let output = run(&old, &dir.path().join("missing.xml"));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
