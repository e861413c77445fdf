use log::info;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::owner::{self, Owner, OwnerDetail, OwnerSummary, Pokemon};
use crate::storage::Storage;

/// Body of the top-level add endpoint. Every field is required; a field is
/// missing when it is absent or null, a zero or empty value is accepted.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewPokemon {
    pokemon_owner_name: Option<String>,
    pokemon_name: Option<String>,
    pokemon_ability: Option<String>,
    initial_position_x: Option<f64>,
    initial_position_y: Option<f64>,
    speed: Option<f64>,
    direction: Option<String>,
}

impl NewPokemon {
    /// Checks the required fields in declaration order and reports the
    /// first missing one.
    fn into_validated(self) -> Result<(String, Pokemon), Error> {
        let owner_name = self
            .pokemon_owner_name
            .ok_or(Error::MissingField("pokemonOwnerName"))?;
        let name = self.pokemon_name.ok_or(Error::MissingField("pokemonName"))?;
        let ability = self
            .pokemon_ability
            .ok_or(Error::MissingField("pokemonAbility"))?;
        let initial_position_x = self
            .initial_position_x
            .ok_or(Error::MissingField("initialPositionX"))?;
        let initial_position_y = self
            .initial_position_y
            .ok_or(Error::MissingField("initialPositionY"))?;
        let speed = self.speed.ok_or(Error::MissingField("speed"))?;
        let direction = self.direction.ok_or(Error::MissingField("direction"))?;

        Ok((
            owner_name,
            Pokemon {
                name,
                ability,
                initial_position_x,
                initial_position_y,
                speed,
                direction,
            },
        ))
    }
}

/// Body of the add-to-existing-owner endpoint
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BatchPokemon {
    pokemon_name: String,
    pokemon_ability: String,
    /// 0 or absent means no Pokemon are added
    #[serde(default)]
    no_of_pokemon: u32,
}

#[derive(Serialize, Debug)]
pub struct Message {
    message: &'static str,
}

impl Message {
    fn new(message: &'static str) -> Json<Message> {
        Json(Message { message })
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReply {
    message: &'static str,
    updated_data: Owner,
}

/// Endpoint for getting the full owner collection.
#[get("/pokemon")]
pub async fn get_all_pokemon(storage: &State<Storage>) -> Result<Json<Vec<Owner>>, Error> {
    info!("Request to /api/pokemon");
    let owners = storage.load().await?;
    Ok(Json(owners))
}

/// Endpoint for adding a Pokemon, creating its owner when unknown.
#[post("/pokemon", data = "<payload>")]
pub async fn add_pokemon(
    storage: &State<Storage>,
    payload: Json<NewPokemon>,
) -> Result<(Status, Json<Message>), Error> {
    info!("Request to add a Pokemon: {:?}", payload);

    let (owner_name, pokemon) = payload.into_inner().into_validated()?;

    storage
        .mutate(|owners| {
            match owner::find_mut(owners, &owner_name) {
                Some(existing) => existing.pokemons.push(pokemon),
                None => {
                    let mut created = Owner::new(owner_name);
                    created.pokemons.push(pokemon);
                    owners.push(created);
                }
            }
            Ok(())
        })
        .await?;

    Ok((Status::Created, Message::new("Pokemon added successfully")))
}

/// Endpoint for adding a batch of identical Pokemon to an existing owner.
#[post("/pokemon/<owner_name>/add", data = "<payload>")]
pub async fn add_pokemon_to_owner(
    storage: &State<Storage>,
    owner_name: String,
    payload: Json<BatchPokemon>,
) -> Result<(Status, Json<Message>), Error> {
    info!("Request to add Pokemon to owner {}", owner_name);

    let batch = payload.into_inner();
    storage
        .mutate(|owners| {
            let existing =
                owner::find_mut(owners, &owner_name).ok_or(Error::OwnerNotFound)?;
            existing.add_defaults(&batch.pokemon_name, &batch.pokemon_ability, batch.no_of_pokemon);
            Ok(())
        })
        .await?;

    Ok((
        Status::Created,
        Message::new("Pokemon added to owner successfully"),
    ))
}

/// Endpoint for deleting every owner with a given name.
/// Reports success even when nothing matched.
#[delete("/pokemon/<owner_name>")]
pub async fn delete_owner(
    storage: &State<Storage>,
    owner_name: String,
) -> Result<Json<Message>, Error> {
    info!("Request to delete owner {}", owner_name);

    storage
        .mutate(|owners| {
            owners.retain(|o| o.owner_name != owner_name);
            Ok(())
        })
        .await?;

    Ok(Message::new("Pokemon owner deleted successfully"))
}

/// Endpoint for deleting all owners unconditionally.
#[delete("/pokemon")]
pub async fn delete_all_owners(storage: &State<Storage>) -> Result<Json<Message>, Error> {
    info!("Request to delete all owners");

    storage.replace(Vec::new()).await?;

    Ok(Message::new("All Pokemon owners deleted successfully"))
}

/// Endpoint for listing every owner with their Pokemon count.
#[get("/pokemon-owners")]
pub async fn get_owner_summaries(
    storage: &State<Storage>,
) -> Result<Json<Vec<OwnerSummary>>, Error> {
    info!("Request to /api/pokemon-owners");

    let owners = storage.load().await?;
    Ok(Json(owners.iter().map(Owner::summary).collect()))
}

/// Endpoint for getting one owner with a trimmed view of their Pokemon.
#[get("/pokemon/<owner_name>")]
pub async fn get_pokemon_by_owner(
    storage: &State<Storage>,
    owner_name: String,
) -> Result<Json<OwnerDetail>, Error> {
    info!("Request to /api/pokemon/{}", owner_name);

    let owners = storage.load().await?;
    let found = owner::find(&owners, &owner_name).ok_or(Error::OwnerNotFound)?;
    Ok(Json(found.detail()))
}

/// Endpoint for shallow-merging a partial object into an owner record.
#[put("/pokemon/<owner_name>", data = "<payload>")]
pub async fn update_owner(
    storage: &State<Storage>,
    owner_name: String,
    payload: Json<Map<String, Value>>,
) -> Result<Json<UpdateReply>, Error> {
    info!("Request to update owner {}", owner_name);

    let patch = payload.into_inner();
    let updated = storage
        .mutate(|owners| {
            let index = owners
                .iter()
                .position(|o| o.owner_name == owner_name)
                .ok_or(Error::OwnerNotFound)?;
            let merged = owners[index].merge(&patch)?;
            owners[index] = merged.clone();
            Ok(merged)
        })
        .await?;

    Ok(Json(UpdateReply {
        message: "Pokemon owner data updated successfully",
        updated_data: updated,
    }))
}
