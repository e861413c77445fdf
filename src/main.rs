use std::str::FromStr;

mod config;
mod error;
mod owner;
mod storage;

#[cfg(test)]
mod tests;

use config::Config;
use log::info;
use rocket_cors::{AllowedMethods, AllowedOrigins, CorsOptions};
use storage::Storage;

#[macro_use]
extern crate rocket;

fn make_cors() -> CorsOptions {
    let allowed_methods: AllowedMethods = ["Get", "Post", "Put", "Delete"]
        .iter()
        .map(|s| FromStr::from_str(s).unwrap())
        .collect();

    CorsOptions::default()
        // or use .allowed_origins(AllowedOrigins::some_exact(&["http://localhost:3000"])) for more restriction
        // for react frontend
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(allowed_methods)
        .allow_credentials(true)
}

fn api_routes() -> Vec<rocket::Route> {
    routes![
        owner::endpoints::get_all_pokemon,
        owner::endpoints::add_pokemon,
        owner::endpoints::add_pokemon_to_owner,
        owner::endpoints::delete_owner,
        owner::endpoints::delete_all_owners,
        owner::endpoints::get_owner_summaries,
        owner::endpoints::get_pokemon_by_owner,
        owner::endpoints::update_owner,
    ]
}

#[launch]
fn rocket() -> _ {
    let _ = env_logger::try_init();

    let config = Config::load().expect("Error loading configuration");
    info!(
        "Serving owner data from {} on port {}",
        config.data_path.display(),
        config.port
    );

    let cors = make_cors().to_cors().expect("Error creating CORS fairing");
    let figment = rocket::Config::figment().merge(("port", config.port));

    rocket::custom(figment)
        .attach(cors)
        .manage(Storage::new(config.data_path))
        .mount("/api", api_routes())
        .register("/", error::catchers())
}
