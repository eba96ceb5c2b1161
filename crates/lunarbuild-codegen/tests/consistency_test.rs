//! Cross-checks between the C and JS fragments
//!
//! The two fragments are parsed back with simple patterns and compared:
//! every `case N:` in C must map to the same name as `name: N` in JS.

use std::collections::BTreeMap;
use std::path::PathBuf;

use lunarbuild_codegen::{ArtifactPair, Generator, Marker, NameTable};
use lunarbuild_core::config::{FrontendTargetConfig, NativeTargetConfig};
use regex::Regex;

const BOARDS_DATA: &str = r#"
BOARD_BEGIN(Easy, 4)
    EDGE(0, 1) EDGE(1, 2) EDGE(2, 3)
BOARD_END
DISPLAY_BEGIN(Easy, 2, 2)
    POS(0, 0) POS(0, 1) POS(1, 0) POS(1, 1)
DISPLAY_END

BOARD_BEGIN(Medium, 6)
    EDGE(0, 1)
BOARD_END

BOARD_BEGIN(Hard, 9)
    EDGE(0, 1)
BOARD_END

/* BOARD_BEGIN(Easy, 4) appears again in a comment */
"#;

fn generate(text: &str) -> (NameTable, ArtifactPair) {
    let native = NativeTargetConfig {
        output: PathBuf::from("boards_glue.c"),
        include: Some("../backend/lunar_game.h".to_string()),
        function: "Glue_InitPresetBoard".to_string(),
        handle: "DisplayableBoard *".to_string(),
        case_template: "INIT_DISPLAYABLE_PRESET_BOARD({{ dest }}, {{ name }});".to_string(),
    };
    let frontend = FrontendTargetConfig {
        output: PathBuf::from("boards.js"),
        export: "PresetBoards".to_string(),
    };
    let table = NameTable::extract(text, &Marker::new("BOARD_BEGIN").unwrap());
    let pair = Generator::new("boards_data.inc", &native, &frontend)
        .unwrap()
        .generate(&table)
        .unwrap();
    (table, pair)
}

/// id -> name, from `case N:` followed by the instantiated template
fn native_cases(native: &str) -> BTreeMap<usize, Vec<String>> {
    let re = Regex::new(r"case (\d+):\s*INIT_DISPLAYABLE_PRESET_BOARD\(dest, (\w+)\);").unwrap();
    let mut cases: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for caps in re.captures_iter(native) {
        cases
            .entry(caps[1].parse().unwrap())
            .or_default()
            .push(caps[2].to_string());
    }
    cases
}

/// name -> id, from `name: N,` lines
fn frontend_entries(frontend: &str) -> BTreeMap<String, usize> {
    let re = Regex::new(r"(?m)^\s+(\w+): (\d+),$").unwrap();
    re.captures_iter(frontend)
        .map(|caps| (caps[1].to_string(), caps[2].parse().unwrap()))
        .collect()
}

#[test]
fn test_every_id_has_one_case_and_one_entry() {
    let (table, pair) = generate(BOARDS_DATA);
    assert_eq!(table.len(), 3);

    let cases = native_cases(&pair.native);
    let mut entries = frontend_entries(&pair.frontend);
    assert_eq!(entries.remove("length"), Some(table.len()));

    assert_eq!(cases.len(), entries.len());
    for (name, id) in &entries {
        assert_eq!(cases[id], vec![name.clone()], "case {id} must be {name}");
        assert_eq!(table.name_of(*id), Some(name.as_str()));
    }
}

#[test]
fn test_easy_hard_scenario() {
    let (_, pair) = generate("BOARD_BEGIN(Easy, 4) ... BOARD_BEGIN(Hard, 9)");

    let cases = native_cases(&pair.native);
    assert_eq!(cases[&0], vec!["Easy".to_string()]);
    assert_eq!(cases[&1], vec!["Hard".to_string()]);

    let entries = frontend_entries(&pair.frontend);
    let expected: BTreeMap<String, usize> = [("Easy", 0), ("Hard", 1), ("length", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_regeneration_is_identical() {
    let (_, first) = generate(BOARDS_DATA);
    let (_, second) = generate(BOARDS_DATA);
    assert_eq!(first, second);
}

#[test]
fn test_inserted_name_renumbers_followers() {
    let (_, before) = generate("BOARD_BEGIN(Easy) BOARD_BEGIN(Hard)");
    let (_, after) = generate("BOARD_BEGIN(Easy) BOARD_BEGIN(Medium) BOARD_BEGIN(Hard)");

    assert_eq!(frontend_entries(&before.frontend)["Hard"], 1);
    assert_eq!(frontend_entries(&after.frontend)["Hard"], 2);
    assert_eq!(native_cases(&after.native)[&2], vec!["Hard".to_string()]);
}
