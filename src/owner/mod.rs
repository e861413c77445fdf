/// Owner HTTP endpoints module
pub mod endpoints;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Represents a Pokemon owner with a name and the Pokemon they own
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// The name of the owner, unique within the collection
    pub owner_name: String,
    /// The Pokemon owned, in insertion order.
    /// Defaults to empty so a stored record lacking the field is
    /// normalized on load; every owner always has a sequence.
    #[serde(default)]
    pub pokemons: Vec<Pokemon>,
    /// Fields attached by partial updates, preserved across load/save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Represents a Pokemon record nested inside an owner's sequence
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub name: String,
    pub ability: String,
    pub initial_position_x: f64,
    pub initial_position_y: f64,
    pub speed: f64,
    pub direction: String,
}

impl Pokemon {
    /// A Pokemon placed at the origin, facing north at speed 10
    pub fn with_defaults(name: String, ability: String) -> Self {
        Pokemon {
            name,
            ability,
            initial_position_x: 0.0,
            initial_position_y: 0.0,
            speed: 10.0,
            direction: "north".to_string(),
        }
    }
}

/// Projection of an owner for the owner listing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub pokemon_owner_name: String,
    pub pokemon_count: usize,
}

/// Projection of an owner with a trimmed view of each Pokemon
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetail {
    pub owner_name: String,
    pub pokemon_count: usize,
    pub pokemon: Vec<PokemonBrief>,
}

/// Name and ability of a Pokemon; position, speed and direction are dropped
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PokemonBrief {
    pub name: String,
    pub ability: String,
}

impl Owner {
    pub fn new(owner_name: String) -> Self {
        Owner {
            owner_name,
            pokemons: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn summary(&self) -> OwnerSummary {
        OwnerSummary {
            pokemon_owner_name: self.owner_name.clone(),
            pokemon_count: self.pokemons.len(),
        }
    }

    pub fn detail(&self) -> OwnerDetail {
        OwnerDetail {
            owner_name: self.owner_name.clone(),
            pokemon_count: self.pokemons.len(),
            pokemon: self
                .pokemons
                .iter()
                .map(|p| PokemonBrief {
                    name: p.name.clone(),
                    ability: p.ability.clone(),
                })
                .collect(),
        }
    }

    /// Appends `count` Pokemon sharing a name and ability, each with
    /// default position, speed and direction
    pub fn add_defaults(&mut self, name: &str, ability: &str, count: u32) {
        for _ in 0..count {
            self.pokemons
                .push(Pokemon::with_defaults(name.to_string(), ability.to_string()));
        }
    }

    /// Shallow merge: every key in the patch overwrites the corresponding
    /// key on this record. Overwriting `ownerName` is an explicit rename.
    /// The merged record must still be a valid owner; a patch that turns
    /// `pokemons` into a non-sequence is rejected.
    pub fn merge(&self, patch: &Map<String, Value>) -> Result<Owner, Error> {
        let mut value = serde_json::to_value(self)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| Error::InvalidUpdate("owner record is not an object".to_string()))?;
        for (key, val) in patch {
            object.insert(key.clone(), val.clone());
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidUpdate(e.to_string()))
    }
}

/// First owner whose name exactly matches, if any
pub fn find<'a>(owners: &'a [Owner], name: &str) -> Option<&'a Owner> {
    owners.iter().find(|o| o.owner_name == name)
}

/// Mutable variant of [`find`]
pub fn find_mut<'a>(owners: &'a mut [Owner], name: &str) -> Option<&'a mut Owner> {
    owners.iter_mut().find(|o| o.owner_name == name)
}
