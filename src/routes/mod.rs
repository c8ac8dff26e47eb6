pub mod home;
pub mod tours;
pub mod users;

use actix_web::web;

use crate::middleware::json_config;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(home::hello)
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/tours")
                        .service(tours::get_all_tours)
                        .service(tours::create_tour)
                        .service(tours::get_tour)
                        .service(tours::update_tour)
                        .service(tours::delete_tour),
                )
                .service(
                    web::scope("/users")
                        .service(users::get_all_users)
                        .service(users::create_user)
                        .service(users::get_user)
                        .service(users::update_user)
                        .service(users::delete_user),
                ),
        );
}
