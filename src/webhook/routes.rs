use ntex::web;

/// Configures webhook routes for external integrations.
///
/// These routes are public endpoints that don't require authentication
/// beyond the per-request webhook verification.
///
/// # Routes
/// - `GET /webhook/whatsapp` - WhatsApp webhook verification
/// - `POST /webhook/whatsapp` - WhatsApp webhook receiver
pub fn whatsapp(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/webhook/whatsapp")
            .service((super::whatsapp::verify, super::whatsapp::receive)),
    );
}
