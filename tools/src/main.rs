//! pet-runner: headless runner for the pet vitals core.
//!
//! Usage:
//!   pet-runner --db pets.db adopt Biscuit cat owner-1
//!   pet-runner --db pets.db show <pet-id>
//!   pet-runner --db pets.db list [owner-id]
//!   pet-runner --db pets.db feed|play|rest <pet-id>
//!   pet-runner --db pets.db delete <pet-id>
//!   pet-runner --db pets.db --ipc-mode

use anyhow::{bail, Result};
use pet_core::{
    action::PetAction,
    clock::SystemClock,
    config::PetConfig,
    pet::PetState,
    service::PetService,
    store::SqlitePetStore,
};
use std::env;
use std::io::{self, BufRead, Write};

type Service = PetService<SqlitePetStore, SystemClock>;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Get { id: String },
    List {
        #[serde(default)]
        owner_id: Option<String>,
    },
    Adopt {
        name:     String,
        species:  String,
        owner_id: String,
    },
    Action { id: String, action: String },
    Delete { id: String },
    Quit,
}

#[derive(serde::Serialize)]
struct PetView {
    #[serde(flatten)]
    pet:  PetState,
    mood: Vec<&'static str>,
}

const VALUE_FLAGS: [&str; 2] = ["--db", "--config"];

const USAGE: &str = "usage: pet-runner [--db PATH] [--config FILE] \
    <adopt|show|list|feed|play|rest|delete> ARGS... | --ipc-mode";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let config = match flag_value(&args, "--config") {
        Some(path) => PetConfig::load(path)?,
        None => PetConfig::default(),
    };

    let store = SqlitePetStore::open(db)?;
    store.migrate()?;
    let service = PetService::new(store, SystemClock, config);
    log::debug!("pet-runner: db={db} ipc_mode={ipc_mode}");

    if ipc_mode {
        return run_ipc_loop(&service);
    }

    let positional = positional_args(&args);
    let Some((cmd, rest)) = positional.split_first() else {
        bail!("{USAGE}");
    };
    run_command(&service, cmd, rest)
}

fn run_command(service: &Service, cmd: &str, rest: &[&str]) -> Result<()> {
    match (cmd, rest) {
        ("adopt", [name, species, owner]) => {
            let pet = service.adopt(name, species, owner)?;
            print_pet(service, &pet);
        }
        ("show", [id]) => match service.get_pet(id)? {
            Some(pet) => print_pet(service, &pet),
            None => bail!("Pet not found: {id}"),
        },
        ("list", []) => {
            for pet in service.list_pets()? {
                print_pet(service, &pet);
            }
        }
        ("list", [owner]) => {
            for pet in service.pets_for_owner(owner)? {
                print_pet(service, &pet);
            }
        }
        ("delete", [id]) => {
            service.delete_pet(id)?;
            println!("deleted {id}");
        }
        ("feed" | "play" | "rest", [id]) => {
            let action: PetAction = cmd.parse()?;
            let pet = service.apply_action(id, action)?;
            print_pet(service, &pet);
        }
        _ => bail!("{USAGE}\nbad arguments for '{cmd}'"),
    }
    Ok(())
}

fn run_ipc_loop(service: &Service) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };
        match handle_ipc(service, cmd) {
            Ok(Some(response)) => writeln!(stdout, "{response}")?,
            Ok(None) => break,
            Err(e) => {
                log::warn!("ipc command failed: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// `Ok(None)` means the client asked to quit.
fn handle_ipc(service: &Service, cmd: IpcCommand) -> Result<Option<serde_json::Value>> {
    let response = match cmd {
        IpcCommand::Get { id } => match service.get_pet(&id)? {
            Some(pet) => serde_json::to_value(view(service, pet))?,
            None => bail!("Pet not found: {id}"),
        },
        IpcCommand::List { owner_id } => {
            let pets = match owner_id {
                Some(owner) => service.pets_for_owner(&owner)?,
                None => service.list_pets()?,
            };
            let views: Vec<PetView> = pets.into_iter().map(|p| view(service, p)).collect();
            serde_json::to_value(views)?
        }
        IpcCommand::Adopt { name, species, owner_id } => {
            serde_json::to_value(view(service, service.adopt(&name, &species, &owner_id)?))?
        }
        IpcCommand::Action { id, action } => {
            let action: PetAction = action.parse()?;
            serde_json::to_value(view(service, service.apply_action(&id, action)?))?
        }
        IpcCommand::Delete { id } => {
            service.delete_pet(&id)?;
            serde_json::json!({ "deleted": id })
        }
        IpcCommand::Quit => return Ok(None),
    };
    Ok(Some(response))
}

fn view(service: &Service, pet: PetState) -> PetView {
    let mood = service.mood(&pet).iter().map(|m| m.message()).collect();
    PetView { pet, mood }
}

fn print_pet(service: &Service, pet: &PetState) {
    let last = pet
        .last_tick_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".into());
    println!(
        "{}  {} the {} (lvl {})  fullness={:>3} happiness={:>3} energy={:>3}  last tick: {last}",
        pet.id, pet.name, pet.species, pet.level, pet.fullness, pet.happiness, pet.energy
    );
    for flag in service.mood(pet) {
        println!("    {}", flag.message());
    }
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Everything that is not a flag or a flag's value.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}
