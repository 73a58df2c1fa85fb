//! EmbedKV Shell
//!
//! Interactive command shell over an in-process engine. Engine events are
//! rendered by a separate thread, which is also where the cosmetic step
//! delay lives.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam::channel::{self, Receiver, Sender};
use embedkv::observer::{ChannelObserver, ObserverEvent, Severity};
use embedkv::protocol::{format_response, handle_line, LineOutcome};
use embedkv::{Config, Engine, FlushMode};
use tracing_subscriber::{fmt, EnvFilter};

/// EmbedKV Shell
#[derive(Parser, Debug)]
#[command(name = "embedkv-shell")]
#[command(about = "Drive an observable LSM engine from the command line")]
#[command(version)]
struct Args {
    /// MemTable capacity (entries) before a flush
    #[arg(short, long, default_value = "5")]
    memtable_max: usize,

    /// Leave threshold flushes pending until the next command
    #[arg(short, long)]
    deferred_flush: bool,

    /// Pause after each search step (milliseconds)
    #[arg(short = 'p', long, default_value = "0")]
    step_delay_ms: u64,

    /// Print the full state after every change
    #[arg(long)]
    show_state: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,embedkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("Shell error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> embedkv::Result<()> {
    let config = Config::builder()
        .memtable_max_entries(args.memtable_max)
        .flush_mode(if args.deferred_flush {
            FlushMode::Deferred
        } else {
            FlushMode::Inline
        })
        .build();

    let (observer, events) = ChannelObserver::unbounded();
    let mut engine = Engine::with_observer(config, observer)?;

    let (reply_tx, reply_rx) = channel::bounded::<String>(1);
    let (done_tx, done_rx) = channel::bounded::<()>(1);

    let renderer = Renderer {
        events,
        replies: reply_rx,
        done: done_tx,
        step_delay: Duration::from_millis(args.step_delay_ms),
        show_state: args.show_state,
    };
    let render_thread = thread::spawn(move || renderer.run());

    let interactive = args.script.is_none();
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    tracing::info!("EmbedKV shell v{}", embedkv::VERSION);
    let mut lines = input.lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let response = match handle_line(&mut engine, &line) {
            LineOutcome::Skip => continue,
            LineOutcome::Quit => break,
            LineOutcome::Reply(response) => response,
        };

        if reply_tx.send(format_response(&response)).is_err() || done_rx.recv().is_err() {
            break;
        }
    }

    drop(reply_tx);
    if render_thread.join().is_err() {
        tracing::error!("renderer thread panicked; output may be incomplete");
    }
    Ok(())
}

/// Prints engine events, then the reply of the command that caused them
struct Renderer {
    events: Receiver<ObserverEvent>,
    replies: Receiver<String>,
    done: Sender<()>,
    step_delay: Duration,
    show_state: bool,
}

impl Renderer {
    fn run(self) {
        // A reply arrives only after the engine call returned, so every event
        // it produced is already queued.
        while let Ok(reply) = self.replies.recv() {
            for event in self.events.try_iter() {
                self.render(&event);
            }
            println!("{}", reply);
            if self.done.send(()).is_err() {
                break;
            }
        }
    }

    fn render(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::StateChanged(snapshot) => {
                if self.show_state {
                    println!("  state: {}", snapshot);
                }
            }
            ObserverEvent::SearchStep { target, key } => {
                println!("  checking {} for '{}'", target, key);
                if !self.step_delay.is_zero() {
                    thread::sleep(self.step_delay);
                }
            }
            ObserverEvent::SearchResult { target, value, .. } => match value {
                Some(v) => println!("  {}: hit ('{}')", target, v),
                None => println!("  {}: miss", target),
            },
            ObserverEvent::Log { message, severity } => {
                let tag = match severity {
                    Severity::Info => "  ",
                    Severity::Success => "+ ",
                    Severity::Error => "! ",
                    Severity::Action => "* ",
                };
                println!("{}{}", tag, message);
            }
        }
    }
}
