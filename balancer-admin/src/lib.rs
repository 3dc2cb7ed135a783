//! Commands behind the `balancer-admin` binary.
//!
//! Every command runs against a [`Storage`] and returns the JSON document
//! the binary prints, so the commands can be exercised without a process.

use anyhow::{Context, Result};
use balancer_model::{Entity, EntityId, EntityKind};
use balancer_storage::Storage;
use clap::Subcommand;
use serde_json::{json, Map, Value};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create the store file and schema if missing
    Init,

    /// Show one entity as unpacked JSON
    Show {
        /// device, loadbalancer (lb), rserver, probe or sticky
        kind: EntityKind,
        id: EntityId,
    },

    /// List load balancers, optionally for one tenant
    Lbs {
        #[arg(short, long)]
        tenant: Option<String>,
    },

    /// List real servers behind a load balancer
    Rservers { lb_id: EntityId },

    /// List session-persistence policies of a load balancer
    Stickies { lb_id: EntityId },

    /// List the probes attached to a real server
    Probes { rs_id: EntityId },

    /// Write an entity from a JSON document tagged with "kind"
    Put {
        /// Inline JSON, e.g. '{"kind":"device","id":1,...}'
        json: String,

        /// Rewrite an existing row instead of inserting
        #[arg(long)]
        update: bool,
    },

    /// Delete a session-persistence policy
    DeleteSticky { id: EntityId },
}

/// Runs `command` and returns the document to print.
pub fn run(storage: &Storage, command: &Command) -> Result<Value> {
    match command {
        Command::Init => {
            storage.get_writer().context("Failed to open store")?;
            let path = storage.config().db_path();
            info!(path = %path.display(), "Store initialized");
            Ok(json!({ "db_path": path.display().to_string() }))
        }
        Command::Show { kind, id } => {
            let entity = storage.get_reader()?.get_entity(*kind, *id)?;
            Ok(Value::Object(flatten(&entity)?))
        }
        Command::Lbs { tenant } => {
            let reader = storage.get_reader()?;
            let lbs = match tenant {
                Some(tenant) => reader.get_load_balancers_for_tenant(tenant)?,
                None => reader.get_load_balancers()?,
            };
            listing(lbs.into_iter().map(Entity::from))
        }
        Command::Rservers { lb_id } => {
            let list = storage.get_reader()?.get_rservers_for_lb(*lb_id)?;
            listing(list.into_iter().map(Entity::from))
        }
        Command::Stickies { lb_id } => {
            let list = storage.get_reader()?.get_stickies_for_lb(*lb_id)?;
            listing(list.into_iter().map(Entity::from))
        }
        Command::Probes { rs_id } => {
            let list = storage.get_reader()?.get_probes_for_rserver(*rs_id)?;
            listing(list.into_iter().map(Entity::from))
        }
        Command::Put { json, update } => {
            let entity: Entity = serde_json::from_str(json).context("Invalid entity document")?;
            let writer = storage.get_writer()?;
            if *update {
                writer.update_object_in_table(&entity)?;
            } else {
                writer.write_entity(&entity)?;
            }
            info!(kind = %entity.kind(), id = %entity.id(), update, "Stored entity");
            Ok(json!({ "kind": entity.kind().as_str(), "id": entity.id() }))
        }
        Command::DeleteSticky { id } => {
            storage.get_writer()?.delete_sticky(*id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

fn flatten(entity: &Entity) -> Result<Map<String, Value>> {
    Ok(entity.unpack()?.flatten())
}

fn listing(entities: impl Iterator<Item = Entity>) -> Result<Value> {
    let items = entities
        .map(|e| flatten(&e).map(Value::Object))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}
