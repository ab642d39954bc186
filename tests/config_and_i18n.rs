//! 설정 파일 로드/저장 및 언어팩 조회 테스트.
use std::fs;
use std::path::PathBuf;

use pipeline_design_toolbox::app::thickness_report;
use pipeline_design_toolbox::config::{load_or_default_from, Config};
use pipeline_design_toolbox::i18n::{keys, parse_toml_to_map, resolve_language, Language, Translator};
use pipeline_design_toolbox::piping::SearchLimits;
use pipeline_design_toolbox::thickness::{ThicknessAllowances, ThicknessInput};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pipeline_design_toolbox-{name}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = scratch_dir("cfg-missing");
    let path = dir.join("config.toml");
    let _ = fs::remove_file(&path);

    let cfg = load_or_default_from(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.language, "auto");
    assert_eq!(cfg.sizing, SearchLimits::default());
    assert_eq!(cfg.thickness.y_coefficient, 0.4);
    assert_eq!(cfg.thickness.weld_efficiency, 1.0);
}

#[test]
fn partial_config_keeps_defaults_for_missing_keys() {
    let dir = scratch_dir("cfg-partial");
    let path = dir.join("config.toml");
    fs::write(
        &path,
        "language = \"ko\"\n\n[sizing]\nmax_iterations = 50\nmax_diameter_m = 2.0\n",
    )
    .expect("write");

    let cfg = load_or_default_from(&path).expect("load");
    assert_eq!(cfg.language, "ko");
    assert_eq!(cfg.sizing.max_iterations, 50);
    assert_eq!(cfg.sizing.max_diameter_m, Some(2.0));
    assert_eq!(cfg.sizing.initial_diameter_m, 0.05);
    assert_eq!(cfg.sizing.step_m, 0.01);
    assert_eq!(cfg.thickness.allowances, ThicknessAllowances::default());
}

#[test]
fn saved_config_loads_back() {
    let dir = scratch_dir("cfg-save");
    let path = dir.join("config.toml");
    let _ = fs::remove_file(&path);

    let mut cfg = load_or_default_from(&path).expect("load");
    cfg.language = "en".to_string();
    cfg.thickness.weld_efficiency = 0.85;
    cfg.thickness.allowances.corrosion_allowance = 1.5;
    cfg.save().expect("save");

    let loaded = load_or_default_from(&path).expect("reload");
    assert_eq!(loaded, cfg);
    assert_ne!(loaded, Config::default());
}

#[test]
fn malformed_config_is_an_error() {
    let dir = scratch_dir("cfg-bad");
    let path = dir.join("config.toml");
    fs::write(&path, "language = [").expect("write");
    assert!(load_or_default_from(&path).is_err());
}

#[test]
fn builtin_strings_per_language() {
    let ko = Translator::new("ko");
    let en = Translator::new("en");
    assert_eq!(ko.language(), Language::Ko);
    assert_eq!(ko.t(keys::APP_EXIT), "프로그램을 종료합니다.");
    assert_eq!(en.t(keys::APP_EXIT), "Exiting.");
    assert_eq!(Translator::new("fr").language(), Language::En);
    assert_eq!(en.t("no.such.key"), "no.such.key");
}

#[test]
fn language_pack_overrides_builtin() {
    let dir = scratch_dir("locales");
    fs::write(
        dir.join("en.toml"),
        "[main_menu]\ntitle = \"== Custom ==\"\n",
    )
    .expect("write");

    let tr = Translator::new_with_pack("en", dir.to_str());
    assert_eq!(tr.t(keys::MAIN_MENU_TITLE), "== Custom ==");
    assert_eq!(tr.lookup(keys::APP_EXIT), None);
    assert_eq!(tr.t(keys::APP_EXIT), "Exiting.");
}

#[test]
fn nested_tables_flatten_to_dotted_keys() {
    let map = parse_toml_to_map("a = \"1\"\n[b]\nc = \"2\"\n[b.d]\ne = \"3\"\n").expect("map");
    assert_eq!(map.get("a").map(String::as_str), Some("1"));
    assert_eq!(map.get("b.c").map(String::as_str), Some("2"));
    assert_eq!(map.get("b.d.e").map(String::as_str), Some("3"));
    assert!(parse_toml_to_map("x = 1").is_none());
}

#[test]
fn cli_language_wins_over_config() {
    assert_eq!(resolve_language("ko", Some("en")), "ko");
    assert_eq!(resolve_language("auto", Some("en")), "en");
    assert_eq!(resolve_language("EN-us", None), "en");
}

#[test]
fn thickness_report_includes_allowances_only_when_set() {
    let input = ThicknessInput::new(1000.0, 10.0, 15_000.0);
    let plain = thickness_report(input, &ThicknessAllowances::default()).expect("report");
    assert!(plain.required.is_none());

    let with_ca = thickness_report(
        input,
        &ThicknessAllowances {
            corrosion_allowance: 0.0625,
            mill_tolerance_fraction: 0.0,
        },
    )
    .expect("report");
    let req = with_ca.required.expect("required thickness");
    assert!((req.minimum_required - (with_ca.result.asme_b31_3_thickness + 0.0625)).abs() < 1e-12);

    let text = toml::to_string_pretty(&with_ca).expect("serialize");
    let value: toml::Value = toml::from_str(&text).expect("parse");
    assert!(value.get("result").is_some());
    assert!(value.get("required").is_some());
}
