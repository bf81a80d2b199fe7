//! Consumption resolution
//!
//! The void swallows an object when the object's center is within reach AND the
//! object is strictly smaller than the void. Objects are always treated as
//! circles of radius `size`, whatever their drawn shape.

use super::player::Player;
use super::state::{ObjectSet, WorldObject};

/// Outcome of one resolver pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Swallowed objects, ascending by id
    pub consumed: Vec<WorldObject>,
    /// Everything not swallowed
    pub remaining: ObjectSet,
}

/// Reach + size predicate
#[inline]
pub fn can_consume(player: &Player, obj: &WorldObject) -> bool {
    player.pos.distance(obj.pos) < player.radius && obj.size < player.radius
}

/// Ids of every object the player can swallow right now, ascending
pub fn find_consumable(player: &Player, objects: &ObjectSet) -> Vec<u32> {
    objects
        .iter()
        .filter(|obj| can_consume(player, obj))
        .map(|obj| obj.id)
        .collect()
}

/// Split `objects` into consumed and remaining using this tick's player
///
/// Every match is judged against the same player state, so growth from one
/// object never lets another object in the same tick qualify.
pub fn resolve(player: &Player, mut objects: ObjectSet) -> Resolution {
    let ids = find_consumable(player, &objects);
    let consumed = objects.remove_many(&ids);
    Resolution {
        consumed,
        remaining: objects,
    }
}
