use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pipeline_design_toolbox::app::{self, AppError, SizingReport};
use pipeline_design_toolbox::config::{self, Config};
use pipeline_design_toolbox::i18n::{self, Translator};
use pipeline_design_toolbox::piping::{self, SizingInput};
use pipeline_design_toolbox::thickness::{ThicknessAllowances, ThicknessInput};
use pipeline_design_toolbox::ui_cli;
use tracing_subscriber::EnvFilter;

/// 배관 내경 사이징과 두께 계산 도구.
#[derive(Debug, Parser)]
#[command(name = "pipeline_design_toolbox", version)]
struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto", global = true)]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 유속/압력강하 제약을 만족하는 최소 내경을 찾는다
    Sizing(SizingArgs),
    /// Barlow 및 ASME B31.3 최소 두께를 계산한다
    Thickness(ThicknessArgs),
    /// 대화형 메뉴 (기본값)
    Interactive,
}

#[derive(Debug, Args)]
struct SizingArgs {
    /// 질량 유량 [kg/s]
    #[arg(long)]
    mass_flow: f64,
    /// 밀도 [kg/m3]
    #[arg(long)]
    density: f64,
    /// 점도 [Pa·s]
    #[arg(long)]
    viscosity: f64,
    /// 배관 길이 [m]
    #[arg(long)]
    length: f64,
    /// 허용 압력강하 [Pa]
    #[arg(long)]
    max_pressure_drop: f64,
    /// 허용 유속 [m/s]
    #[arg(long)]
    max_velocity: f64,
    /// 후보 직경 평가 횟수 상한 (설정 파일 값을 덮어씀)
    #[arg(long)]
    max_iterations: Option<usize>,
    /// 후보 직경 상한 [m]
    #[arg(long)]
    max_diameter: Option<f64>,
    /// 결과를 TOML로 출력
    #[arg(long)]
    toml: bool,
}

#[derive(Debug, Args)]
struct ThicknessArgs {
    /// 설계 내압 P
    #[arg(long)]
    pressure: f64,
    /// 외경 D
    #[arg(long)]
    diameter: f64,
    /// 허용 응력 S
    #[arg(long)]
    stress: f64,
    /// 용접 효율 E
    #[arg(long)]
    weld_efficiency: Option<f64>,
    /// ASME B31.3 Y 계수
    #[arg(long)]
    y_coefficient: Option<f64>,
    /// 부식 여유 (D 와 같은 길이 단위)
    #[arg(long)]
    corrosion_allowance: Option<f64>,
    /// 제작 공차 비율 (예: 0.125)
    #[arg(long)]
    mill_tolerance: Option<f64>,
    /// 결과를 TOML로 출력
    #[arg(long)]
    toml: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    init_tracing();
    if let Err(err) = try_run(Cli::parse()) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

/// RUST_LOG 환경변수 기반 로그 필터를 초기화한다. 기본값은 warn.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default_from(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match cli.command {
        Some(Command::Sizing(args)) => run_sizing(&tr, &cfg, args),
        Some(Command::Thickness(args)) => run_thickness(&tr, &cfg, args),
        Some(Command::Interactive) | None => app::run(&mut cfg, &mut tr),
    }
}

fn run_sizing(tr: &Translator, cfg: &Config, args: SizingArgs) -> Result<(), AppError> {
    let mut limits = cfg.sizing;
    if let Some(n) = args.max_iterations {
        limits.max_iterations = n;
    }
    if args.max_diameter.is_some() {
        limits.max_diameter_m = args.max_diameter;
    }
    let input = SizingInput {
        mass_flow_kg_per_s: args.mass_flow,
        density_kg_per_m3: args.density,
        viscosity_pa_s: args.viscosity,
        pipe_length_m: args.length,
        max_pressure_drop_pa: args.max_pressure_drop,
        max_velocity_m_per_s: args.max_velocity,
    };
    let result = piping::size_pipeline_with_limits(&input, &limits)?;
    let report = SizingReport { input, result };
    if args.toml {
        print!("{}", toml::to_string_pretty(&report)?);
    } else {
        ui_cli::print_sizing_report(tr, &report);
    }
    Ok(())
}

fn run_thickness(tr: &Translator, cfg: &Config, args: ThicknessArgs) -> Result<(), AppError> {
    let defaults = &cfg.thickness;
    let input = ThicknessInput::new(args.pressure, args.diameter, args.stress)
        .with_weld_efficiency(args.weld_efficiency.unwrap_or(defaults.weld_efficiency))
        .with_y_coefficient(args.y_coefficient.unwrap_or(defaults.y_coefficient));
    let allowances = ThicknessAllowances {
        corrosion_allowance: args
            .corrosion_allowance
            .unwrap_or(defaults.allowances.corrosion_allowance),
        mill_tolerance_fraction: args
            .mill_tolerance
            .unwrap_or(defaults.allowances.mill_tolerance_fraction),
    };
    let report = app::thickness_report(input, &allowances)?;
    if args.toml {
        print!("{}", toml::to_string_pretty(&report)?);
    } else {
        ui_cli::print_thickness_report(tr, &report);
    }
    Ok(())
}
