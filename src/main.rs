// SPDX-License-Identifier: MPL-2.0
use iced_flipbook::app::{self, paths, Flags};
use iced_flipbook::book::PageSequence;
use iced_flipbook::config;
use iced_flipbook::i18n::fluent::I18n;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
iced_flipbook - magazine flipbook viewer

USAGE:
  iced_flipbook [OPTIONS]

OPTIONS:
  --lang <LOCALE>        Interface language (e.g. en-US, es)
  --config-dir <DIR>     Directory holding settings.toml
  --book-dir <DIR>       Directory the page files are resolved against
  --start <N>            First page number
  --end <N>              Last page number
  --prefix <PREFIX>      Page file prefix (default: pages/a-)
  --ext <EXT>            Page file extension (default: .png)
  --write-config         Save the effective settings and exit
  -h, --help             Print this help
";

struct Args {
    lang: Option<String>,
    config_dir: Option<String>,
    book_dir: Option<PathBuf>,
    start: Option<u32>,
    end: Option<u32>,
    prefix: Option<String>,
    ext: Option<String>,
    write_config: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let args = Args {
        lang: pargs.opt_value_from_str("--lang")?,
        config_dir: pargs.opt_value_from_str("--config-dir")?,
        book_dir: pargs.opt_value_from_str("--book-dir")?,
        start: pargs.opt_value_from_str("--start")?,
        end: pargs.opt_value_from_str("--end")?,
        prefix: pargs.opt_value_from_str("--prefix")?,
        ext: pargs.opt_value_from_str("--ext")?,
        write_config: pargs.contains("--write-config"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {remaining:?}");
    }

    Ok(Some(args))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.config_dir);

    let (mut config, warning) = config::load();
    if let Some(key) = warning {
        let i18n = I18n::new(args.lang.clone(), &config);
        log::warn!("{}", i18n.tr(&key));
    }

    if args.book_dir.is_some() {
        config.book.base_dir = args.book_dir;
    }
    if args.start.is_some() {
        config.book.start_page = args.start;
    }
    if args.end.is_some() {
        config.book.end_page = args.end;
    }
    if args.prefix.is_some() {
        config.book.path_prefix = args.prefix;
    }
    if args.ext.is_some() {
        config.book.extension = args.ext;
    }

    let range = config.page_range();
    let pages = match PageSequence::from_range(&range) {
        Ok(pages) => pages,
        Err(err) => {
            log::error!("{err}: pages {} to {}", range.start, range.end);
            return ExitCode::from(2);
        }
    };

    if args.write_config {
        return match config::save(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("failed to save settings: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let flags = Flags {
        lang: args.lang,
        config,
        pages,
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
