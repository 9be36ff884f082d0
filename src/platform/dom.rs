//! DOM presenter (WASM only)
//!
//! Mirrors simulation entities into absolutely positioned `<div>`s inside the
//! game container and keeps the HUD text current. Expects the host page to
//! provide `.game-container`, `#player` (with a `#parachute` child) and the
//! HUD/game over elements by id.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::HandleTable;
use crate::sim::{CoinTier, EntityId, FeedbackBand, GameOverSummary, GameState, Hud};
use crate::tuning::Tuning;

/// Look up an element by id as an `HtmlElement`
fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

fn set_px(el: &HtmlElement, prop: &str, value: f32) {
    let _ = el.style().set_property(prop, &format!("{}px", value));
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn coin_glyph(tier: CoinTier) -> &'static str {
    match tier {
        CoinTier::Normal => "🪙",
        CoinTier::Double => "💎",
        CoinTier::Triple => "⭐",
    }
}

fn reaction(band: FeedbackBand) -> (&'static str, &'static str) {
    match band {
        FeedbackBand::Low => ("😭", "Oh no! We fell too soon. Let's try again for a higher score!"),
        FeedbackBand::Mid => ("😟", "That was a good run, but we can fly higher than that! Keep going!"),
        FeedbackBand::High => ("😃", "Wow! You're an amazing pilot! That's a fantastic score!"),
    }
}

/// Renders a `GameState` into the page
pub struct DomPresenter {
    document: Document,
    container: Element,
    player: Option<HtmlElement>,
    obstacles: HandleTable<EntityId, HtmlElement>,
    coins: HandleTable<EntityId, HtmlElement>,
    /// Last HUD written, to skip redundant DOM writes
    last_hud: Option<Hud>,
}

impl DomPresenter {
    /// Attach to the page's game container (`.game-container`)
    pub fn attach(document: Document) -> Option<Self> {
        let container = document.query_selector(".game-container").ok().flatten()?;
        let player = html_by_id(&document, "player");
        if player.is_none() {
            log::warn!("No #player element - player sprite will not move");
        }
        Some(Self {
            document,
            container,
            player,
            obstacles: HandleTable::new(),
            coins: HandleTable::new(),
            last_hud: None,
        })
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Fill in arena, sprite and parachute geometry from the laid-out page
    pub fn measure(&self, tuning: Tuning) -> Tuning {
        let width = self.container.client_width() as f32;
        let height = self.container.client_height() as f32;
        let mut tuning = if width > 0.0 && height > 0.0 {
            tuning.with_arena(width, height)
        } else {
            tuning
        };

        if let Some(player) = &self.player {
            let w = player.offset_width() as f32;
            let h = player.offset_height() as f32;
            if w > 0.0 && h > 0.0 {
                tuning.player_size = glam::Vec2::new(w, h);
            }
        }
        if let Some(chute) = html_by_id(&self.document, "parachute") {
            let w = chute.offset_width() as f32;
            let h = chute.offset_height() as f32;
            if w > 0.0 && h > 0.0 {
                tuning.hitbox_offset =
                    glam::Vec2::new(chute.offset_left() as f32, chute.offset_top() as f32);
                tuning.hitbox_size = glam::Vec2::new(w, h);
            }
        }

        log::info!(
            "Arena {}x{}, hitbox {:?}+{:?}",
            tuning.arena_width,
            tuning.arena_height,
            tuning.hitbox_offset,
            tuning.hitbox_size
        );
        tuning
    }

    fn spawn_div(&self, classes: &[&str], text: Option<&str>) -> Option<HtmlElement> {
        let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        for class in classes {
            let _ = el.class_list().add_1(class);
        }
        if let Some(text) = text {
            el.set_text_content(Some(text));
        }
        self.container.append_child(&el).ok()?;
        Some(el)
    }

    /// Sync the page with the state after a frame
    pub fn render(&mut self, state: &GameState) {
        if let Some(player) = &self.player {
            set_px(player, "left", state.player.pos.x);
            set_px(player, "top", state.player.pos.y);
        }

        // Handle tables are taken out so `spawn_div` can borrow self
        let mut obstacles = std::mem::take(&mut self.obstacles);
        obstacles.sync(
            state.obstacles().iter().map(|o| (o.id, o)),
            |_| self.spawn_div(&["obstacle"], None),
            |el, o| {
                set_px(el, "left", o.pos.x);
                set_px(el, "top", o.pos.y);
            },
            |el| el.remove(),
        );
        self.obstacles = obstacles;

        let mut coins = std::mem::take(&mut self.coins);
        coins.sync(
            state.coins().iter().map(|c| (c.id, c)),
            |c| {
                let tier_class = format!("{}-coin", c.tier.as_str());
                self.spawn_div(&["coin", tier_class.as_str()], Some(coin_glyph(c.tier)))
            },
            |el, c| {
                set_px(el, "left", c.pos.x);
                set_px(el, "top", c.pos.y);
            },
            |el| el.remove(),
        );
        self.coins = coins;

        self.render_hud(state.hud());
    }

    fn render_hud(&mut self, hud: Hud) {
        let last = self.last_hud.as_ref();
        if last.map(|h| h.score) != Some(hud.score) {
            set_text(&self.document, "current-score", &hud.score.to_string());
        }
        if last.map(|h| h.coins) != Some(hud.coins) {
            set_text(&self.document, "coin-count", &hud.coins.to_string());
        }
        if last.map(|h| h.high_score) != Some(hud.high_score) {
            set_text(&self.document, "high-score", &hud.high_score.to_string());
        }
        if last.map(|h| &h.badges) != Some(&hud.badges) {
            let labels: Vec<&str> = hud.badges.iter().map(|b| b.label()).collect();
            set_text(&self.document, "badge-area", &labels.join(" "));
        }
        self.last_hud = Some(hud);
    }

    /// Show the game over screen
    pub fn show_game_over(&self, summary: &GameOverSummary) {
        set_text(
            &self.document,
            "final-score",
            &format!("Your Score: {} | Coins: {}", summary.final_score, summary.coin_count),
        );
        let (face, message) = reaction(summary.band);
        set_text(&self.document, "girl", face);
        set_text(&self.document, "girl-reaction", message);
        if let Some(screen) = self.document.get_element_by_id("game-over-screen") {
            let _ = screen.class_list().remove_1("hidden");
        }
    }

    /// Drop all entity elements and hide the game over screen
    pub fn reset(&mut self) {
        self.obstacles.clear(|el| el.remove());
        self.coins.clear(|el| el.remove());
        self.last_hud = None;
        if let Some(screen) = self.document.get_element_by_id("game-over-screen") {
            let _ = screen.class_list().add_1("hidden");
        }
    }
}
