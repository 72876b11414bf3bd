use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use crossbeam_channel::Receiver;
use std::{
    env,
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    thread,
    time::Duration,
};

use skysim::{
    resources::{Outbound, SimulationHandle},
    server::{connect, setup_app, EnvConfig, InboundMessage},
    systems::shutdown_on_disconnect_system,
};

const DEFAULT_ADDR: &str = "127.0.0.1:8765";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match env::var("SKYSIM_CONFIG") {
        Ok(path) => {
            println!("Loading config from {}", path);
            EnvConfig::from_yaml_file(&path)?
        }
        Err(_) => EnvConfig::default(),
    };
    let addr = env::var("SKYSIM_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    // Start TCP server
    let listener = TcpListener::bind(&addr)?;
    println!("PORT={}", listener.local_addr()?.port());

    // Accept one connection
    let (stream, peer) = listener.accept()?;
    println!("Peer connected: {}", peer);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            config.physics.timestep,
        ))),
        LogPlugin::default(),
    ));

    let mut app = setup_app(app, &config)?;
    let handle = connect(&mut app, &config);
    app.add_systems(Last, shutdown_on_disconnect_system);

    spawn_writer(stream.try_clone()?, handle.outbound().clone());
    // The reader owns the only handle, so the link closes when the peer leaves.
    spawn_reader(stream, handle);

    println!("Starting simulation at {:.1} Hz", 1.0 / config.physics.timestep);
    app.run();

    Ok(())
}

/// Forwards JSON lines from the peer into the simulation.
fn spawn_reader(stream: TcpStream, handle: SimulationHandle) {
    thread::spawn(move || {
        let reader = BufReader::new(stream);

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("Failed to read from peer: {}", err);
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match InboundMessage::parse(line).and_then(InboundMessage::into_input) {
                Ok(Some(input)) => {
                    if !handle.submit(input) {
                        break;
                    }
                }
                Ok(None) => debug!("Ignoring relay message: {}", line),
                Err(err) => {
                    warn!("Rejected message: {}", err);
                    handle.reject(err.to_string());
                }
            }
        }

        info!("Peer disconnected");
    });
}

/// Writes everything the simulation publishes back to the peer, one JSON
/// object per line.
fn spawn_writer(mut stream: TcpStream, outbound: Receiver<Outbound>) {
    thread::spawn(move || {
        for message in outbound.iter() {
            let written = serde_json::to_string(&message)
                .map_err(std::io::Error::from)
                .and_then(|line| writeln!(stream, "{}", line));

            if let Err(err) = written {
                warn!("Failed to write to peer: {}", err);
                break;
            }
        }
    });
}
