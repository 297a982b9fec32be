/// OpenAPI documentation for picshare-service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Picshare API",
        version = "1.0.0",
        description = "Backend for a photo-sharing social application: posts with attached files, comments, likes, saves, follow edges, profile and feed assembly.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "posts", description = "Post creation, retrieval, search, and deletion"),
        (name = "comments", description = "Comment management on posts"),
        (name = "social", description = "Likes, saves, and follow edges"),
        (name = "feed", description = "Timeline assembly"),
        (name = "users", description = "Profile views and updates"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /login"))
                        .build(),
                ),
            )
        }
    }
}
