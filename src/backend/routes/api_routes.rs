/**
 * API Routes
 *
 * Every route below requires a bearer token; handlers take `AuthUser`.
 *
 * # Routes
 *
 * ## Ideas
 * - `POST /api/ideas` - Create
 * - `GET /api/ideas/{idea_id}` - Fetch
 * - `PATCH /api/ideas/{idea_id}` - Edit (owner)
 * - `DELETE /api/ideas/{idea_id}` - Delete (owner)
 * - `POST /api/ideas/{idea_id}/like` - Toggle like
 * - `POST /api/ideas/{idea_id}/comments` - Comment
 *
 * ## Collaboration
 * - `POST /api/ideas/{idea_id}/collaborate` - Request
 * - `POST /api/collaborations/{collab_id}/resolve` - Approve / reject
 * - `GET /api/collaborations` - Accepted collaborations
 *
 * ## Groups
 * - `GET /api/ideas/{idea_id}/members` - Members
 * - `POST /api/groups/remove-member` - Remove a member (owner)
 * - `POST /api/groups/leave` - Leave
 * - `GET|POST /api/ideas/{idea_id}/messages` - Group messages
 *
 * ## Notifications
 * - `GET /api/notifications` - List
 * - `POST /api/notifications/{notification_id}/read` - Mark read
 * - `GET /api/realtime` - SSE stream
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::collab::handlers as collab;
use crate::backend::ideas::handlers as ideas;
use crate::backend::membership::handlers as membership;
use crate::backend::messaging::handlers as messaging;
use crate::backend::notifications::handlers as notifications;
use crate::backend::realtime::handle_realtime_subscription;
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/ideas", post(ideas::create_idea))
        .route(
            "/api/ideas/{idea_id}",
            get(ideas::get_idea)
                .patch(ideas::update_idea)
                .delete(ideas::delete_idea),
        )
        .route("/api/ideas/{idea_id}/like", post(ideas::toggle_like))
        .route("/api/ideas/{idea_id}/comments", post(ideas::add_comment))
        .route(
            "/api/ideas/{idea_id}/collaborate",
            post(collab::request_collaboration),
        )
        .route(
            "/api/collaborations/{collab_id}/resolve",
            post(collab::resolve_collaboration),
        )
        .route("/api/collaborations", get(collab::list_collaborations))
        .route("/api/ideas/{idea_id}/members", get(membership::get_members))
        .route("/api/groups/remove-member", post(membership::remove_member))
        .route("/api/groups/leave", post(membership::leave_group))
        .route(
            "/api/ideas/{idea_id}/messages",
            get(messaging::list_messages).post(messaging::send_message),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications/{notification_id}/read",
            post(notifications::mark_notification_read),
        )
        .route("/api/realtime", get(handle_realtime_subscription))
}
