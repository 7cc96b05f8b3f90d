use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "lede API",
        version = "0.1.0",
        description = "Article extraction over HTTP: fetch a news page and return its \
            title, authors, body text, images, and keywords as JSON."
    ),
    paths(
        crate::routes::scrape,
        crate::routes::scrape_post,
        crate::routes::health,
        crate::routes::index,
    ),
    components(schemas(
        crate::dto::ScrapeBody,
        crate::dto::ArticleResponse,
        crate::dto::HealthResponse,
        crate::dto::ServiceInfoResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "scrape", description = "Article extraction"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
