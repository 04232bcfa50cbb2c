//! Timed status effects and the replacement decision.
//!
//! An entity holds at most one live [`EffectInstance`] per [`EffectKind`].
//! Adding an effect builds an [`EffectReplacement`] record pairing the new
//! instance with the one it would displace, lets `effect_add` observers veto
//! it, and otherwise installs the new instance unconditionally.

use ember_engine::event::{Event, HandlerList, ListenerError};
use indexmap::IndexMap;
use strum::{EnumIter, IntoStaticStr};

/// Default effect length: 30 seconds at 20 ticks per second.
pub const DEFAULT_DURATION_TICKS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum EffectKind {
    Speed,
    Slowness,
    Haste,
    MiningFatigue,
    Strength,
    InstantHealth,
    InstantDamage,
    JumpBoost,
    Nausea,
    Regeneration,
    Resistance,
    FireResistance,
    WaterBreathing,
    Invisibility,
    Blindness,
    NightVision,
    Hunger,
    Weakness,
    Poison,
    Wither,
    HealthBoost,
    Absorption,
    Saturation,
    Levitation,
    FatalPoison,
    ConduitPower,
    SlowFalling,
}

impl EffectKind {
    /// Protocol id (1-based, in declaration order).
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_id(id: u8) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        <&'static str>::from(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectInstance {
    pub kind: EffectKind,
    /// Level minus one: amplifier 0 is "Speed I".
    pub amplifier: u8,
    /// Remaining ticks.
    pub duration: u32,
    pub visible: bool,
    pub ambient: bool,
}

impl EffectInstance {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            amplifier: 0,
            duration: DEFAULT_DURATION_TICKS,
            visible: true,
            ambient: false,
        }
    }

    pub fn with_amplifier(mut self, amplifier: u8) -> Self {
        self.amplifier = amplifier;
        self
    }

    pub fn with_duration(mut self, ticks: u32) -> Self {
        self.duration = ticks;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_ambient(mut self, ambient: bool) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn level(&self) -> u16 {
        u16::from(self.amplifier) + 1
    }

    pub fn has_expired(&self) -> bool {
        self.duration == 0
    }
}

/// Live effects of one entity, keyed by kind, in application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSet {
    effects: IndexMap<EffectKind, EffectInstance>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectInstance> {
        self.effects.get(&kind)
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectInstance> {
        self.effects.values()
    }

    /// Install `effect` as the live instance of its kind, returning the one
    /// it displaced.
    fn put(&mut self, effect: EffectInstance) -> Option<EffectInstance> {
        self.effects.insert(effect.kind, effect)
    }

    pub fn remove(&mut self, kind: EffectKind) -> Option<EffectInstance> {
        self.effects.shift_remove(&kind)
    }

    /// Advance every effect by `ticks` and drop the ones that ran out.
    /// Returns the expired instances.
    pub fn tick(&mut self, ticks: u32) -> Vec<EffectInstance> {
        let mut expired = Vec::new();
        self.effects.retain(|_, effect| {
            effect.duration = effect.duration.saturating_sub(ticks);
            if effect.has_expired() {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }
}

/// Anything that carries an effect set.
pub trait Living {
    fn runtime_id(&self) -> u64;
    fn display_name(&self) -> &str;
    fn effects(&self) -> &EffectSet;
    fn effects_mut(&mut self) -> &mut EffectSet;
}

/// A pending effect addition: the new instance and the live instance of the
/// same kind it would replace, if any.
///
/// Only built by [`EffectReplacement::against`], which guarantees that
/// `previous` is exactly the live instance at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectReplacement {
    effect: EffectInstance,
    previous: Option<EffectInstance>,
}

impl EffectReplacement {
    pub fn against(effects: &EffectSet, effect: EffectInstance) -> Self {
        Self {
            effect,
            previous: effects.get(effect.kind).copied(),
        }
    }

    pub fn effect(&self) -> &EffectInstance {
        &self.effect
    }

    pub fn old_effect(&self) -> Option<&EffectInstance> {
        self.previous.as_ref()
    }

    pub fn has_old_effect(&self) -> bool {
        self.previous.is_some()
    }

    /// Whether applying this will replace an existing effect.
    pub fn will_modify(&self) -> bool {
        self.has_old_effect()
    }
}

pub type EffectAddEvent<'a> = Event<'a, dyn Living, EffectReplacement>;

#[derive(Debug, Clone, PartialEq)]
pub enum EffectAddOutcome {
    /// The new instance is live; `replaced` is the instance it displaced.
    Applied { replaced: Option<EffectInstance> },
    /// An observer vetoed the addition; the effect set is untouched.
    Cancelled,
}

impl EffectAddOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Add `effect` to `entity`, giving `observers` the chance to veto.
pub fn add_effect<L: Living + 'static>(
    entity: &mut L,
    effect: EffectInstance,
    observers: &HandlerList<dyn Living, EffectReplacement>,
) -> EffectAddOutcome {
    let replacement = EffectReplacement::against(entity.effects(), effect);

    let subject: &dyn Living = &*entity;
    let mut ev = Event::new(subject, &replacement);
    observers.call(&mut ev);
    if ev.is_cancelled() {
        tracing::debug!(
            "{} effect on {} cancelled by an observer",
            effect.kind.name(),
            entity.display_name()
        );
        return EffectAddOutcome::Cancelled;
    }

    let replaced = entity.effects_mut().put(effect);
    EffectAddOutcome::Applied { replaced }
}

/// Observer that refuses to replace an effect with a weaker one: a lower
/// amplifier, or the same amplifier with less time left.
pub fn reject_weaker_replacement(ev: &mut EffectAddEvent<'_>) -> Result<(), ListenerError> {
    let new = ev.payload().effect();
    if let Some(old) = ev.payload().old_effect() {
        if new.amplifier < old.amplifier
            || (new.amplifier == old.amplifier && new.duration < old.duration)
        {
            ev.cancel();
        }
    }
    Ok(())
}
