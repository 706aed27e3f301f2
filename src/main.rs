//! kanaconv - 가나 -> 로마자 변환 명령줄 도구

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use kanaconv::config::{config_path, load_config};
use kanaconv::{KanaConv, UnknownPolicy, VowelStyle};

#[derive(Parser)]
#[command(name = "kanaconv", version, about = "Convert kana to Hepburn romaji")]
struct Cli {
    /// Text to convert (reads stdin line by line if omitted)
    text: Option<String>,
    /// Write long vowels with a circumflex (ô) instead of a macron (ō)
    #[arg(long)]
    circumflex: bool,
    /// Uppercase the whole result
    #[arg(long)]
    uppercase: bool,
    /// What to do with characters that are not kana: discard, raise or include
    #[arg(long, value_name = "POLICY")]
    unknown: Option<UnknownPolicy>,
    /// Path to the config file (default: ~/.config/kanaconv/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // 설정 파일 -> 명령줄 옵션 순으로 적용
    let path = cli.config.clone().unwrap_or_else(config_path);
    let mut config = load_config(&path);
    if cli.circumflex {
        config.vowel_style = VowelStyle::Circumflex;
    }
    if cli.uppercase {
        config.uppercase = true;
    }
    if let Some(policy) = cli.unknown {
        config.unknown_policy = policy;
    }
    log::debug!("설정: {:?}", config);

    let mut conv = KanaConv::with_config(config);

    if let Some(text) = cli.text {
        match conv.to_romaji(&text) {
            Ok(romaji) => println!("{}", romaji),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to read stdin: {}", e);
                process::exit(1);
            }
        };

        match conv.to_romaji(&line) {
            Ok(romaji) => {
                if let Err(e) = writeln!(out, "{}", romaji) {
                    eprintln!("Error: failed to write stdout: {}", e);
                    process::exit(1);
                }
            }
            Err(e) => {
                // 실패한 줄만 보고하고 계속 진행
                eprintln!("line {}: {}", line_no + 1, e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
