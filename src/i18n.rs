use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::warn;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SIZING: &str = "main_menu.sizing";
    pub const MAIN_MENU_THICKNESS: &str = "main_menu.thickness";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SIZING_HEADING: &str = "sizing.heading";
    pub const PROMPT_MASS_FLOW: &str = "prompt.mass_flow";
    pub const PROMPT_DENSITY: &str = "prompt.density";
    pub const PROMPT_VISCOSITY: &str = "prompt.viscosity";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_MAX_PRESSURE_DROP: &str = "prompt.max_pressure_drop";
    pub const PROMPT_MAX_VELOCITY: &str = "prompt.max_velocity";
    pub const RESULT_DIAMETER: &str = "result.diameter";
    pub const RESULT_VELOCITY: &str = "result.velocity";
    pub const RESULT_REYNOLDS: &str = "result.reynolds";
    pub const RESULT_FRICTION_FACTOR: &str = "result.friction_factor";
    pub const RESULT_PRESSURE_DROP: &str = "result.pressure_drop";
    pub const RESULT_ITERATIONS: &str = "result.iterations";
    pub const REGIME_LAMINAR: &str = "regime.laminar";
    pub const REGIME_TURBULENT: &str = "regime.turbulent";

    pub const THICKNESS_HEADING: &str = "thickness.heading";
    pub const THICKNESS_NOTE_UNITS: &str = "thickness.note_units";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_OUTSIDE_DIAMETER: &str = "prompt.outside_diameter";
    pub const PROMPT_ALLOWABLE_STRESS: &str = "prompt.allowable_stress";
    pub const PROMPT_WELD_EFFICIENCY: &str = "prompt.weld_efficiency";
    pub const PROMPT_Y_COEFFICIENT: &str = "prompt.y_coefficient";
    pub const RESULT_BARLOW: &str = "result.barlow";
    pub const RESULT_ASME: &str = "result.asme_b31_3";
    pub const RESULT_THICK_WALL_WARNING: &str = "result.thick_wall_warning";
    pub const RESULT_REQUIRED_THICKNESS: &str = "result.required_thickness";
    pub const RESULT_NOMINAL_THICKNESS: &str = "result.nominal_thickness";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 locales/ 를 찾고, 그마저 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 없으면 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin: Option<&str> = match self.lang {
            Language::En => en(key).or_else(|| ko(key)),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        builtin.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!(path = %path.display(), "language pack ignored: no string entries");
    }
    map
}

/// 중첩 테이블을 점(.)으로 이은 플랫 맵으로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Pipeline Design Toolbox ===",
        MAIN_MENU_SIZING => "1) 배관 내경 사이징",
        MAIN_MENU_THICKNESS => "2) 배관 두께 계산",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SIZING_HEADING => "\n-- 배관 내경 사이징 (유속/압력강하 기준) --",
        PROMPT_MASS_FLOW => "질량 유량 [kg/s]: ",
        PROMPT_DENSITY => "밀도 [kg/m3]: ",
        PROMPT_VISCOSITY => "점도 [Pa·s]: ",
        PROMPT_LENGTH => "배관 길이 [m]: ",
        PROMPT_MAX_PRESSURE_DROP => "허용 압력강하 [Pa]: ",
        PROMPT_MAX_VELOCITY => "허용 유속 [m/s]: ",
        RESULT_DIAMETER => "필요 내경:",
        RESULT_VELOCITY => "유속:",
        RESULT_REYNOLDS => "레이놀즈수:",
        RESULT_FRICTION_FACTOR => "마찰계수:",
        RESULT_PRESSURE_DROP => "압력강하:",
        RESULT_ITERATIONS => "탐색 횟수:",
        REGIME_LAMINAR => "층류",
        REGIME_TURBULENT => "난류",
        THICKNESS_HEADING => "\n-- 배관 두께 계산 (Barlow / ASME B31.3) --",
        THICKNESS_NOTE_UNITS => "참고: P, D, S는 같은 단위계(psi/in 또는 Pa/m)로 입력하세요.",
        PROMPT_PRESSURE => "설계 내압 P: ",
        PROMPT_OUTSIDE_DIAMETER => "외경 D: ",
        PROMPT_ALLOWABLE_STRESS => "허용 응력 S: ",
        PROMPT_WELD_EFFICIENCY => "용접 효율 E (엔터=기본값): ",
        PROMPT_Y_COEFFICIENT => "Y 계수 (엔터=기본값): ",
        RESULT_BARLOW => "Barlow 두께:",
        RESULT_ASME => "ASME B31.3 두께:",
        RESULT_THICK_WALL_WARNING => "주의: t ≥ D/6 이므로 B31.3 식 적용 범위를 벗어납니다.",
        RESULT_REQUIRED_THICKNESS => "부식 여유 포함 최소 두께:",
        RESULT_NOMINAL_THICKNESS => "제작 공차 보정 공칭 두께:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 변경되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Pipeline Design Toolbox ===",
        MAIN_MENU_SIZING => "1) Pipe diameter sizing",
        MAIN_MENU_THICKNESS => "2) Pipe wall thickness",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please select again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SIZING_HEADING => "\n-- Pipe Diameter Sizing (velocity / pressure drop) --",
        PROMPT_MASS_FLOW => "Mass flow [kg/s]: ",
        PROMPT_DENSITY => "Density [kg/m3]: ",
        PROMPT_VISCOSITY => "Viscosity [Pa·s]: ",
        PROMPT_LENGTH => "Pipe length [m]: ",
        PROMPT_MAX_PRESSURE_DROP => "Max pressure drop [Pa]: ",
        PROMPT_MAX_VELOCITY => "Max velocity [m/s]: ",
        RESULT_DIAMETER => "Required ID:",
        RESULT_VELOCITY => "Velocity:",
        RESULT_REYNOLDS => "Reynolds number:",
        RESULT_FRICTION_FACTOR => "Friction factor:",
        RESULT_PRESSURE_DROP => "Pressure drop:",
        RESULT_ITERATIONS => "Candidates evaluated:",
        REGIME_LAMINAR => "laminar",
        REGIME_TURBULENT => "turbulent",
        THICKNESS_HEADING => "\n-- Pipe Wall Thickness (Barlow / ASME B31.3) --",
        THICKNESS_NOTE_UNITS => "Note: enter P, D and S in one consistent system (psi/in or Pa/m).",
        PROMPT_PRESSURE => "Design pressure P: ",
        PROMPT_OUTSIDE_DIAMETER => "Outside diameter D: ",
        PROMPT_ALLOWABLE_STRESS => "Allowable stress S: ",
        PROMPT_WELD_EFFICIENCY => "Weld efficiency E (enter = default): ",
        PROMPT_Y_COEFFICIENT => "Y coefficient (enter = default): ",
        RESULT_BARLOW => "Barlow thickness:",
        RESULT_ASME => "ASME B31.3 thickness:",
        RESULT_THICK_WALL_WARNING => "Warning: t ≥ D/6, outside the B31.3 thin-wall formula range.",
        RESULT_REQUIRED_THICKNESS => "Minimum thickness incl. corrosion allowance:",
        RESULT_NOMINAL_THICKNESS => "Nominal thickness incl. mill tolerance:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Auto  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        _ => return None,
    })
}
