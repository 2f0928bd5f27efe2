//! Built-in slash-commands (/me, /house, /say, /shout, /whisper).

use tracing::warn;

use crate::chat::command::Invocation;
use crate::chat::formatter::{render, FormatContext, ACTION_FORMAT, ACTION_ONLY_FORMAT, HOUSE_FORMAT};
use crate::chat::proximity::{players_within, ProximityKind};
use crate::chat::router::ChatRouter;
use crate::common::types::Player;

pub const ME_TOKEN: &str = "/me";
pub const HOUSE_TOKEN: &str = "/house";

/// Register the five built-in commands.
pub fn register_builtins(router: &mut ChatRouter) {
    // Failures are already logged by add_command
    let _ = router.add_command(ME_TOKEN, slash_me);
    let _ = router.add_command(HOUSE_TOKEN, slash_house);
    for kind in ProximityKind::ALL {
        let _ = router.add_command(
            kind.token(),
            move |router: &ChatRouter, sender: &Player, inv: &Invocation<'_>| {
                slash_proximity(router, sender, inv, kind)
            },
        );
    }
}

/// Narrate an action to everyone.
fn slash_me(router: &ChatRouter, sender: &Player, inv: &Invocation<'_>) {
    let text = match inv.body {
        Some(body) => render(
            ACTION_FORMAT,
            &FormatContext::new(&sender.username, sender.house, body),
        ),
        None => render(
            ACTION_ONLY_FORMAT,
            &FormatContext::new(&sender.username, sender.house, ""),
        ),
    };
    router.send_to_all(router.players().iter(), &text);
}

/// Chat with the sender's house only.
fn slash_house(router: &ChatRouter, sender: &Player, inv: &Invocation<'_>) {
    let body = match inv.require_body() {
        Ok(body) => body,
        Err(e) => {
            warn!(sender = %sender.username, "Ignoring chat line: {}", e);
            return;
        }
    };

    let text = render(
        HOUSE_FORMAT,
        &FormatContext::new(&sender.username, sender.house, body),
    );
    let players = router.players();
    router.send_to_all(players.iter().filter(|p| p.house == sender.house), &text);
}

/// Chat with everyone within the kind's range.
fn slash_proximity(router: &ChatRouter, sender: &Player, inv: &Invocation<'_>, kind: ProximityKind) {
    let body = match inv.require_body() {
        Ok(body) => body,
        Err(e) => {
            warn!(sender = %sender.username, "Ignoring chat line: {}", e);
            return;
        }
    };

    let text = render(
        kind.format(),
        &FormatContext::new(&sender.username, sender.house, body),
    );
    let range = kind.range(router.distances());
    let players = router.players();
    router.send_to_all(players_within(&players, &sender.position, range), &text);
}
