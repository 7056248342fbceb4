//! Integration tests for tool table conversion.
//!
//! These exercise the public API end to end: fixture files through the
//! parser and generator, through the preset mapping and back, and the
//! round-trip properties of the canonical form.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tbl_sync::generator::generate_tool_table_file;
use tbl_sync::mapping::entries_to_presets;
use tbl_sync::{
    export_preset_json, export_presets, generate_tool_line, generate_tool_table,
    import_tool_table, import_tool_table_file, parse_tool_line, parse_tool_table,
    parse_tool_table_file, write_tool_table_file, FormatError, PresetDocument, SmoothConfig,
    SyncError, ToolEntry, ToolPreset,
};

/// Fixture directory for integration tests
const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURE_DIR).join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("Fixture should be readable")
}

fn sorted(mut entries: Vec<ToolEntry>) -> Vec<ToolEntry> {
    entries.sort_by_key(|e| e.tool_number);
    entries
}

// ==================== Fixture tables ====================

#[test]
fn test_parse_mill_fixture() {
    let entries = parse_tool_table_file(&fixture("mill.tbl")).expect("Should parse");
    let numbers: Vec<_> = entries.iter().map(|e| e.tool_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 20, 5]);

    assert_eq!(entries[0].comment, "Probe");
    assert_eq!(entries[0].z_offset, None);
    assert_eq!(entries[2].comment, "1/8\" 2 Flute");
    assert_eq!(entries[4].comment, "");
}

#[test]
fn test_canonical_mill_table() {
    let entries = parse_tool_table(&read_fixture("mill.tbl")).unwrap();
    insta::assert_snapshot!(generate_tool_table(&entries), @r#"
T1 P0 D+2.997200 ;Probe
T2 P0 D+3.175000 Z-41.031000 ;Spot Drill
T3 P0 D+3.175000 Z-48.107441 ;1/8" 2 Flute
T5 P0 D+11.112500 Z-34.227900
T20 P0 D+1.000000 ;Drill
"#);
}

#[test]
fn test_canonical_lathe_table() {
    let entries = parse_tool_table(&read_fixture("lathe.tbl")).unwrap();
    insta::assert_snapshot!(generate_tool_table(&entries), @r#"
T1 P1 D+0.400000 X+0.500000 Z+1.000000 Q2 I+95.000000 J+155.000000 ;Turning RH
T2 P2 D+0.800000 X-0.250000 Z+0.750000 Q6 I+0.000000 J+0.000000 ;Threading
T7 P7 A+10.000000 B-20.000000 C+30.000000 U+0.100000 V+0.200000 W+0.300000 ;5-axis probe
"#);
}

#[test]
fn test_canonical_form_is_idempotent_on_fixtures() {
    for name in ["mill.tbl", "lathe.tbl"] {
        let first = generate_tool_table(&parse_tool_table(&read_fixture(name)).unwrap());
        let second = generate_tool_table(&parse_tool_table(&first).unwrap());
        assert_eq!(first, second, "{} not idempotent", name);
    }
}

// ==================== Documented properties ====================

#[test]
fn test_sort_invariant() {
    let entries = vec![
        ToolEntry::new(5).with_pocket(0).with_diameter(2.0),
        ToolEntry::new(1).with_pocket(0).with_diameter(3.0),
        ToolEntry::new(3).with_pocket(0).with_diameter(4.0),
    ];
    let table = generate_tool_table(&entries);
    let lines: Vec<_> = table.lines().collect();
    assert!(lines[0].starts_with("T1 "));
    assert!(lines[1].starts_with("T3 "));
    assert!(lines[2].starts_with("T5 "));
}

#[test]
fn test_duplicate_rejection() {
    let err = parse_tool_table("T1 P0 D+2.0 ;A\nT1 P0 D+3.0 ;B").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("Duplicate tool number"));
}

#[test]
fn test_presence_vs_zero() {
    let entry = parse_tool_line("T20 P0 D+1.000000 ;Drill").unwrap().unwrap();
    assert_eq!(entry.z_offset, None);
    assert_eq!(entry.diameter, Some(1.0));
}

#[test]
fn test_negative_diameter_rejection() {
    let err = parse_tool_line("T1 P0 D-5.0").unwrap_err();
    assert!(matches!(err, FormatError::NegativeDiameter { .. }));
    assert!(err.to_string().contains("non-negative"));
}

#[test]
fn test_blank_and_comment_skip() {
    let entries = parse_tool_table("\n;note\nT1 P0 D+2.0 ;x\n\n").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tool_number, 1);
}

#[test]
fn test_exact_formatting() {
    let mut entry = ToolEntry::new(1)
        .with_pocket(0)
        .with_diameter(2.9972)
        .with_comment("Probe");
    entry.z_offset = Some(-41.031);
    assert_eq!(generate_tool_line(&entry), "T1 P0 D+2.997200 Z-41.031000 ;Probe");
}

#[test]
fn test_comment_preservation() {
    let line = "T3 P0 D+3.175000 ;1/8\" 2 Flute";
    let entry = parse_tool_line(line).unwrap().unwrap();
    assert_eq!(entry.comment, "1/8\" 2 Flute");
    assert_eq!(generate_tool_line(&entry), line);
}

// ==================== Files ====================

#[test]
fn test_write_and_reparse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tool.tbl");

    let entries = parse_tool_table(&read_fixture("lathe.tbl")).unwrap();
    write_tool_table_file(&path, &entries).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.ends_with(";5-axis probe\n"));
    assert_eq!(written, generate_tool_table_file(&entries));

    let reparsed = parse_tool_table_file(&path).unwrap();
    assert_eq!(sorted(reparsed), sorted(entries));
}

#[test]
fn test_empty_file_is_empty_table() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(parse_tool_table_file(file.path()).unwrap().is_empty());
}

#[test]
fn test_missing_file() {
    let err = parse_tool_table_file(Path::new("/nonexistent/tool.tbl")).unwrap_err();
    assert!(matches!(err, SyncError::FileNotFound { .. }));
    assert!(!err.is_client_error());
}

#[test]
fn test_smooth_config_from_ini_file() {
    let dir = tempfile::tempdir().unwrap();
    let ini_path = dir.path().join("mill.ini");
    std::fs::write(
        &ini_path,
        "[EMCIO]\nTOOL_TABLE = mill.tbl\n\n[SMOOTH]\nURL=https://api.loobric.com\nTOKEN=abc123\nMACHINE_ID=mill01\n",
    )
    .unwrap();
    std::fs::copy(fixture("mill.tbl"), dir.path().join("mill.tbl")).unwrap();

    let config = SmoothConfig::from_ini_file(&ini_path).unwrap();
    assert_eq!(config.machine_id(), Some("mill01"));
    assert_eq!(config.url(), Some("https://api.loobric.com"));

    let table = config.tool_table().expect("TOOL_TABLE should resolve");
    let presets = import_tool_table_file(table, config.machine_id().unwrap()).unwrap();
    assert_eq!(presets.len(), 5);
    assert!(presets
        .iter()
        .all(|p| p.machine_id.as_deref() == Some("mill01")));
}

#[test]
fn test_smooth_config_missing_file() {
    let err = SmoothConfig::from_ini_file(Path::new("/nonexistent/mill.ini")).unwrap_err();
    assert!(matches!(err, SyncError::FileNotFound { .. }));
}

// ==================== Preset mapping ====================

#[test]
fn test_preset_json_snapshot() {
    let entries = parse_tool_table(&read_fixture("mill.tbl")).unwrap();
    let probe = ToolPreset::from_tool_entry(&entries[2], "mill01");
    insta::assert_snapshot!(serde_json::to_string_pretty(&probe).unwrap(), @r#"
{
  "machine_id": "mill01",
  "tool_number": 3,
  "pocket": 0,
  "description": "1/8\" 2 Flute",
  "offsets": {
    "z": -48.107441,
    "z_unit": "mm"
  },
  "metadata": {
    "source": "linuxcnc",
    "diameter": 3.175,
    "diameter_unit": "mm",
    "linuxcnc_data": {
      "tool_number": 3,
      "pocket": 0,
      "diameter": 3.175,
      "z_offset": -48.107441
    }
  }
}
"#);
}

#[test]
fn test_round_trip_through_presets() {
    for name in ["mill.tbl", "lathe.tbl"] {
        let content = read_fixture(name);
        let original = parse_tool_table(&content).unwrap();

        let presets = import_tool_table(&content, "mill01").unwrap();
        let json = serde_json::to_string(&PresetDocument::bulk(presets)).unwrap();
        let exported = export_preset_json(&json).unwrap();
        let restored = parse_tool_table(&exported).unwrap();

        assert_eq!(sorted(restored), sorted(original), "{} lost data", name);
    }
}

#[test]
fn test_export_presets_fixture() {
    let table = export_preset_json(&read_fixture("presets.json")).unwrap();
    assert_eq!(
        table,
        "T1 P0 D+6.350000 Z-50.800000 A+15.000000 ;1/4 inch drill\nT2 P0 D+6.000000 Z-60.000000 ;6mm Endmill"
    );
}

#[test]
fn test_export_rejects_duplicate_tool_numbers() {
    let entries = parse_tool_table("T1 P0 ;A\nT2 P0 ;B").unwrap();
    let mut presets = entries_to_presets(&entries, "mill01");
    presets[1].tool_number = 1;
    let err = export_presets(&presets).unwrap_err();
    assert!(matches!(err, SyncError::DuplicatePreset { tool_number: 1 }));
    assert!(err.is_client_error());
}

// ==================== Properties ====================

fn real() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of((-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|n| n as f64 / 1e6))
}

fn entry_strategy() -> impl Strategy<Value = ToolEntry> {
    (
        any::<u32>(),
        proptest::option::of((0i64..1_000_000_000_000i64).prop_map(|n| n as f64 / 1e6)),
        [real(), real(), real(), real(), real(), real()],
        [real(), real(), real(), real(), real()],
        proptest::option::of(0u32..10),
        "[A-Za-z0-9/\"#.,()+ -]{0,24}",
    )
        .prop_map(|(pocket, diameter, [x, y, z, a, b, c], [u, v, w, i, j], q, comment)| ToolEntry {
            tool_number: 0,
            pocket: Some(pocket),
            diameter,
            x_offset: x,
            y_offset: y,
            z_offset: z,
            a_angle: a,
            b_angle: b,
            c_angle: c,
            u_offset: u,
            v_offset: v,
            w_offset: w,
            orientation: q,
            front_angle: i,
            back_angle: j,
            comment: comment.trim().to_string(),
        })
}

fn table_strategy() -> impl Strategy<Value = Vec<ToolEntry>> {
    proptest::collection::btree_map(any::<u32>(), entry_strategy(), 0..16).prop_map(
        |map: BTreeMap<u32, ToolEntry>| {
            // Reverse so the generator has to sort.
            map.into_iter()
                .rev()
                .map(|(tool_number, entry)| ToolEntry {
                    tool_number,
                    ..entry
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_table_round_trip(table in table_strategy()) {
        let text = generate_tool_table(&table);
        let decoded = parse_tool_table(&text).unwrap();
        prop_assert_eq!(decoded, sorted(table));
    }

    #[test]
    fn prop_canonical_form_idempotent(table in table_strategy()) {
        let once = generate_tool_table(&table);
        let twice = generate_tool_table(&parse_tool_table(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_output_sorted(table in table_strategy()) {
        let text = generate_tool_table(&table);
        let numbers: Vec<u32> = parse_tool_table(&text)
            .unwrap()
            .iter()
            .map(|e| e.tool_number)
            .collect();
        prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }
}
