use clap::{App, Arg};
use owo_colors::OwoColorize;
use std::{
    error::Error,
    fs::{self, File},
    io::{self, Read, Seek, SeekFrom, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, SystemTime},
};

type MyResult<T> = Result<T, Box<dyn Error>>;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct Config {
    path: String,
}

#[derive(Debug)]
struct Tailer {
    last_update: Option<SystemTime>,
    last_cursor: u64,
}

pub fn get_args() -> MyResult<Config> {
    let matches = App::new("logr")
        .version("0.1.0")
        .author("Marcin Rogowski <rogowskimarcin11@gmail.com>")
        .about("Rust log watcher")
        .usage("logr [file]")
        .arg(
            Arg::with_name("file")
                .multiple(true)
                .value_name("FILE")
                .help("File to watch"),
        )
        .get_matches();

    let mut files = matches.values_of_lossy("file").unwrap_or_default();
    if files.len() != 1 {
        println!("usage: logr [file]");
        std::process::exit(0);
    }

    Ok(Config {
        path: files.remove(0),
    })
}

pub fn run(config: Config) -> MyResult<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupted))?;

    let mut tailer = Tailer::new();
    let mut stdout = io::stdout();

    loop {
        if interrupted.load(Ordering::Relaxed) {
            eprintln!("\n{}", "interrupted".bright_blue());
            break;
        }

        let modified = match fs::metadata(&config.path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                eprintln!("{} {}", "error:".red().bold(), err);
                break;
            }
        };

        if tailer.has_changed(modified) {
            tailer.drain(&config.path, modified, &mut stdout)?;
        } else {
            thread::sleep(POLL_INTERVAL);
        }
    }

    Ok(())
}

impl Tailer {
    fn new() -> Tailer {
        Tailer {
            last_update: None,
            last_cursor: 0,
        }
    }

    fn has_changed(&self, modified: SystemTime) -> bool {
        self.last_update != Some(modified)
    }

    fn drain(&mut self, path: &str, modified: SystemTime, out: &mut impl Write) -> MyResult<()> {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(self.last_cursor))?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        out.write_all(&buf)?;
        out.flush()?;

        self.last_cursor = file.stream_position()?;
        // the mtime seen at stat time, not re-queried after the read
        self.last_update = Some(modified);

        Ok(())
    }
}
