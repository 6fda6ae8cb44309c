use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;
use std::thread;
use std::time::Duration;

use melody::keyboard::KeyboardInputController;
use melody::midi::{output_ports, MidiOutChannel, MidiOutSequencer};
use melody::notation::note_name_to_midi_pitch;
use melody::playback::PlaybackScheduler;
use melody::{compile, Config, NotationBuffer};

const USAGE: &str = "Usage: melody timeline <input|-> [--config config.yaml]
       melody play <input|-> [--config config.yaml]
       melody keys <note>... [--config config.yaml]
       melody ports";

/// How often the wait loop checks for end-of-track.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        process::exit(1);
    };

    if command == "ports" {
        match output_ports() {
            Ok(ports) if ports.is_empty() => eprintln!("No MIDI output ports"),
            Ok(ports) => {
                for (index, name) in ports.iter().enumerate() {
                    println!("{}: {}", index, name);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    // Parse flags
    let mut operands: Vec<&String> = Vec::new();
    let mut config_path: Option<&String> = None;
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--config" {
            config_path = rest.next();
            if config_path.is_none() {
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        } else {
            operands.push(arg);
        }
    }

    let config = match config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if command == "keys" {
        press_keys(&operands, &config);
        return;
    }

    let &[input_path] = operands.as_slice() else {
        eprintln!("{}", USAGE);
        process::exit(1);
    };

    // Read notation
    let notation = if input_path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(input_path)
    };
    let notation = match notation {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let timeline = compile(&notation, &config);

    match command.as_str() {
        "timeline" => match serde_yaml::to_string(&timeline) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Error writing timeline: {}", e);
                process::exit(1);
            }
        },
        "play" => {
            let device = MidiOutSequencer::new(config.port.clone(), config.tempo);
            let mut scheduler = PlaybackScheduler::new(device);
            if let Err(e) = scheduler.play(timeline) {
                eprintln!("Playback failed: {}", e);
                process::exit(1);
            }
            while scheduler.poll().is_none() {
                thread::sleep(POLL_INTERVAL);
            }
            eprintln!("Playback finished");
        }
        _ => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    }
}

/// Sound each named note on the keyboard's output channel, one quarter note
/// apiece, and print the notation the key presses wrote.
fn press_keys(names: &[&String], config: &Config) {
    if names.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut keyboard = KeyboardInputController::new(&config.keyboard);
    let mut keys = Vec::with_capacity(names.len());
    for name in names {
        let key = note_name_to_midi_pitch(name).and_then(|pitch| keyboard.key_for_pitch(pitch));
        match key {
            Some(key) => keys.push(key),
            None => {
                eprintln!("Error: '{}' is not a key on the keyboard", name);
                process::exit(1);
            }
        }
    }

    let mut synth = match MidiOutChannel::open(config.port.as_deref(), config.channel.num) {
        Ok(synth) => synth,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let hold = Duration::from_secs_f64(60.0 / f64::from(config.tempo.max(1)));
    let mut buffer = NotationBuffer::new();
    for key in keys {
        keyboard.on_press(key, &config.channel, &mut synth, &mut buffer);
        thread::sleep(hold);
        keyboard.on_release(key, &config.channel, &mut synth);
    }
    println!("{}", buffer.read().trim_start());
}
