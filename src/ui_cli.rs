use std::io::{self, Write};

use crate::app::{self, AppError, SizingReport, ThicknessReport};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::piping::{self, FlowRegime, SizingInput, SizingResult};
use crate::thickness::ThicknessInput;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PipeSizing,
    WallThickness,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SIZING));
    println!("{}", tr.t(keys::MAIN_MENU_THICKNESS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::PipeSizing),
            "2" => return Ok(MenuChoice::WallThickness),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 내경 사이징 메뉴를 처리한다.
pub fn handle_pipe_sizing(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SIZING_HEADING));
    let input = SizingInput {
        mass_flow_kg_per_s: read_f64(tr, keys::PROMPT_MASS_FLOW)?,
        density_kg_per_m3: read_f64(tr, keys::PROMPT_DENSITY)?,
        viscosity_pa_s: read_f64(tr, keys::PROMPT_VISCOSITY)?,
        pipe_length_m: read_f64(tr, keys::PROMPT_LENGTH)?,
        max_pressure_drop_pa: read_f64(tr, keys::PROMPT_MAX_PRESSURE_DROP)?,
        max_velocity_m_per_s: read_f64(tr, keys::PROMPT_MAX_VELOCITY)?,
    };
    let result = piping::size_pipeline_with_limits(&input, &cfg.sizing)?;
    print_sizing_report(tr, &SizingReport { input, result });
    Ok(())
}

/// 두께 계산 메뉴를 처리한다.
pub fn handle_wall_thickness(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::THICKNESS_HEADING));
    println!("{}", tr.t(keys::THICKNESS_NOTE_UNITS));
    let pressure = read_f64(tr, keys::PROMPT_PRESSURE)?;
    let diameter = read_f64(tr, keys::PROMPT_OUTSIDE_DIAMETER)?;
    let stress = read_f64(tr, keys::PROMPT_ALLOWABLE_STRESS)?;
    let defaults = &cfg.thickness;
    let e = read_f64_or(tr, keys::PROMPT_WELD_EFFICIENCY, defaults.weld_efficiency)?;
    let y = read_f64_or(tr, keys::PROMPT_Y_COEFFICIENT, defaults.y_coefficient)?;
    let input = ThicknessInput::new(pressure, diameter, stress)
        .with_weld_efficiency(e)
        .with_y_coefficient(y);
    let report = app::thickness_report(input, &defaults.allowances)?;
    print_thickness_report(tr, &report);
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "ko",
        "3" => "en",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

/// 사이징 결과를 출력한다.
pub fn print_sizing_report(tr: &Translator, report: &SizingReport) {
    let r: &SizingResult = &report.result;
    println!(
        "{} {:.4} m ({:.2} in)",
        tr.t(keys::RESULT_DIAMETER),
        r.diameter_m,
        r.diameter_in
    );
    println!("{} {:.3} m/s", tr.t(keys::RESULT_VELOCITY), r.velocity_m_per_s);
    let regime = match r.regime {
        FlowRegime::Laminar => tr.t(keys::REGIME_LAMINAR),
        FlowRegime::Turbulent => tr.t(keys::REGIME_TURBULENT),
    };
    println!("{} {:.0} ({regime})", tr.t(keys::RESULT_REYNOLDS), r.reynolds);
    println!("{} {:.5}", tr.t(keys::RESULT_FRICTION_FACTOR), r.friction_factor);
    println!("{} {:.1} Pa", tr.t(keys::RESULT_PRESSURE_DROP), r.pressure_drop_pa);
    println!("{} {}", tr.t(keys::RESULT_ITERATIONS), r.iterations);
}

/// 두께 결과를 출력한다.
pub fn print_thickness_report(tr: &Translator, report: &ThicknessReport) {
    let r = &report.result;
    println!("{} {:.4}", tr.t(keys::RESULT_BARLOW), r.barlow_thickness);
    println!("{} {:.4}", tr.t(keys::RESULT_ASME), r.asme_b31_3_thickness);
    if !r.asme_thin_wall_valid {
        println!("{}", tr.t(keys::RESULT_THICK_WALL_WARNING));
    }
    if let Some(req) = &report.required {
        println!(
            "{} {:.4}",
            tr.t(keys::RESULT_REQUIRED_THICKNESS),
            req.minimum_required
        );
        println!(
            "{} {:.4}",
            tr.t(keys::RESULT_NOMINAL_THICKNESS),
            req.nominal_with_mill_tolerance
        );
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt_key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(tr.t(prompt_key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 기본값을 사용한다.
fn read_f64_or(tr: &Translator, prompt_key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{}[{default}] ", tr.t(prompt_key)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
