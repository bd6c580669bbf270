//! Repository structs, one per table. Each exposes `async fn`s taking a
//! `&PgPool` so handlers and adapters can share a single pool.

mod article_repo;
mod session_repo;
mod user_repo;
mod wordpress_site_repo;

pub use article_repo::ArticleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use wordpress_site_repo::WordPressSiteRepo;
