//! Ability execution: cost check, payment, tag dispatch, per-hit resolution
//!
//! Every [`AbilityTag`] maps to exactly one handler. `Standard` abilities are
//! healing when aimed at allies with positive power, damage when they have
//! power, and a plain announced use otherwise.

use super::{resolve_hit_with_rng, ActionReport, HitResult, TargetOutcome};
use crate::ability::AbilityData;
use crate::battle::Battlefield;
use crate::character::{CharacterId, CostError};
use crate::config::GameplayConfig;
use crate::events::{log_message, BattleEvent, EventSink};
use crate::stats::round_half_away;
use crate::status::{absorb_damage, apply_effect, apply_mark_bonus, EffectDuration, StatusEffectInstance};
use crate::types::{AbilityTag, DamageType, Element, Priority, StatusEffectType};
use rand::Rng;

/// Execute `ability` for `user` against an already-resolved target list.
///
/// An unaffordable ability is rejected before anything changes: a combat log
/// line is published and the cost error is returned. An unknown user is a
/// logged no-op.
pub fn execute_ability<R: Rng>(
    field: &mut Battlefield,
    user: CharacterId,
    ability: &AbilityData,
    targets: &[CharacterId],
    config: &GameplayConfig,
    rng: &mut R,
    events: &mut dyn EventSink,
) -> Result<ActionReport, CostError> {
    let Some(actor) = field.get_mut(user) else {
        tracing::warn!("ability {} used by unknown character {}", ability.name, user);
        return Ok(ActionReport::new(user, &ability.name, ability.tag, ability.element));
    };

    if let Err(err) = actor.check_cost(ability) {
        tracing::debug!("{} rejected {}: {}", actor.name(), ability.name, err);
        log_message(events, format!("{} cannot use {}!", actor.name(), ability.name));
        return Err(err);
    }

    actor.consume_ability_cost(ability);

    if ability.damage_type == DamageType::Magical
        && ability.element != Element::None
        && ability.tag != AbilityTag::MagicBolt
    {
        actor.last_spell_element = Some(ability.element);
    }

    let element = match ability.tag {
        AbilityTag::MagicBolt => actor.bolt_element(),
        _ => ability.element,
    };

    let mut exec = Execution {
        field,
        config,
        rng,
        events,
        user,
        ability,
        report: ActionReport::new(user, &ability.name, ability.tag, element),
    };

    match ability.tag {
        AbilityTag::Swap => exec.swap(targets),
        AbilityTag::Anticipate => exec.stance(
            StatusEffectType::Anticipate,
            Some(Priority::Positive),
            "anticipates! Will act first next turn.",
        ),
        AbilityTag::Prepare => exec.stance(
            StatusEffectType::Prepare,
            Some(Priority::Negative),
            "prepares! Will recover resources but act last next turn.",
        ),
        AbilityTag::Protect => exec.stance(
            StatusEffectType::Protect,
            None,
            "takes a protective stance! Drawing enemy attention.",
        ),
        AbilityTag::Hide => exec.stance(StatusEffectType::Hide, None, "hides! Less likely to be targeted."),
        AbilityTag::Ritual => exec.ritual(),
        AbilityTag::MagicBolt => exec.magic_bolt(targets),
        AbilityTag::Mark => exec.mark(targets),
        AbilityTag::WordOfProtection => exec.word_of_protection(targets),
        AbilityTag::Standard => exec.standard(targets),
    }

    tracing::debug!("{}", exec.report.summary());
    Ok(exec.report)
}

struct Execution<'a, R: Rng> {
    field: &'a mut Battlefield,
    config: &'a GameplayConfig,
    rng: &'a mut R,
    events: &'a mut dyn EventSink,
    user: CharacterId,
    ability: &'a AbilityData,
    report: ActionReport,
}

impl<R: Rng> Execution<'_, R> {
    fn log(&mut self, text: String) {
        log_message(self.events, text);
    }

    fn name(&self, id: CharacterId) -> String {
        self.field.name(id).to_string()
    }

    fn announce(&mut self, target: CharacterId) {
        self.events.publish(&BattleEvent::AbilityUsed {
            user: self.user,
            ability: self.ability.name.clone(),
            target,
        });
    }

    fn alive(&self, target: CharacterId) -> bool {
        self.field.is_alive(target)
    }

    // --- Special handlers ---

    fn swap(&mut self, targets: &[CharacterId]) {
        let Some(&target) = targets.first() else {
            tracing::warn!("{} has nobody to swap with", self.name(self.user));
            return;
        };
        let (Some(a), Some(b)) = (self.field.get(self.user), self.field.get(target)) else {
            tracing::warn!("swap with unknown character {}", target);
            return;
        };
        let (user_pos, target_pos) = ((a.row, a.column), (b.row, b.column));

        if let Some(c) = self.field.get_mut(self.user) {
            (c.row, c.column) = target_pos;
        }
        if let Some(c) = self.field.get_mut(target) {
            (c.row, c.column) = user_pos;
        }

        self.announce(target);
        self.events.publish(&BattleEvent::PositionSwapped {
            first: self.user,
            second: target,
        });
        let text = format!("{} swaps position with {}!", self.name(self.user), self.name(target));
        self.log(text);
        self.report.outcomes.push(TargetOutcome::new(target));
    }

    /// Self-applied indefinite effect, optionally moving the user's priority bucket
    fn stance(&mut self, effect_type: StatusEffectType, priority: Option<Priority>, message: &str) {
        let user = self.user;
        let Some(c) = self.field.get_mut(user) else {
            return;
        };
        if let Some(priority) = priority {
            c.priority = priority;
        }
        let effect = StatusEffectInstance::indefinite(effect_type, 0, Some(user));
        apply_effect(c, user, effect, self.events);

        self.announce(user);
        let text = format!("{} {}", self.name(user), message);
        self.log(text);
        self.report.outcomes.push(TargetOutcome {
            effect_applied: Some(effect_type),
            ..TargetOutcome::new(user)
        });
    }

    /// Turn the HP already paid into mana
    fn ritual(&mut self) {
        let user = self.user;
        let gain = round_half_away(self.ability.hp_cost as f64 * self.config.status.ritual_mana_per_hp);
        let Some(c) = self.field.get_mut(user) else {
            return;
        };
        let restored = c.restore_mana(gain.max(0) as u32);
        self.report.mana_gained = restored;

        self.announce(user);
        let text = format!("{} performs a dark ritual! Gains {} mana.", self.name(user), restored);
        self.log(text);
        self.report.outcomes.push(TargetOutcome::new(user));
    }

    fn magic_bolt(&mut self, targets: &[CharacterId]) {
        let text = format!(
            "{}'s {} takes on {:?} element!",
            self.name(self.user),
            self.ability.name,
            self.report.element
        );
        self.log(text);

        for &target in targets {
            if let Some(mut outcome) = self.strike(target) {
                self.check_defeated(&mut outcome);
                self.report.outcomes.push(outcome);
            }
        }
    }

    /// Damage, then a timed Mark on every target still standing, hit or not
    fn mark(&mut self, targets: &[CharacterId]) {
        for &target in targets {
            let Some(mut outcome) = self.strike(target) else {
                continue;
            };

            if let Some(c) = self.field.get_mut(target).filter(|c| c.is_alive()) {
                let mark = StatusEffectInstance::new(
                    StatusEffectType::Mark,
                    EffectDuration::Turns(self.config.status.mark_duration),
                    0,
                    Some(self.user),
                );
                apply_effect(c, target, mark, self.events);
                outcome.effect_applied = Some(StatusEffectType::Mark);
                let text = format!("{} is marked! Incoming damage increased.", self.name(target));
                self.log(text);
            }

            self.check_defeated(&mut outcome);
            self.report.outcomes.push(outcome);
        }
    }

    /// Indefinite Shield worth the ability's power on each living target
    fn word_of_protection(&mut self, targets: &[CharacterId]) {
        let value = self.ability.base_power;
        for &target in targets {
            if !self.alive(target) {
                continue;
            }
            self.announce(target);

            if let Some(c) = self.field.get_mut(target) {
                let shield = StatusEffectInstance::indefinite(StatusEffectType::Shield, value, Some(self.user));
                apply_effect(c, target, shield, self.events);
            }

            let text = format!(
                "{} casts {} on {}! Shield: {}",
                self.name(self.user),
                self.ability.name,
                self.name(target),
                value
            );
            self.log(text);
            self.report.outcomes.push(TargetOutcome {
                effect_applied: Some(StatusEffectType::Shield),
                ..TargetOutcome::new(target)
            });
        }
    }

    // --- Standard path ---

    fn standard(&mut self, targets: &[CharacterId]) {
        if self.ability.is_healing() {
            self.heal(targets);
        } else if self.ability.base_power > 0 {
            self.damage(targets);
        } else {
            self.utility(targets);
        }
    }

    fn heal(&mut self, targets: &[CharacterId]) {
        for &target in targets {
            if !self.alive(target) {
                continue;
            }
            self.announce(target);

            let healed = self
                .field
                .get_mut(target)
                .map_or(0, |c| c.heal(self.ability.base_power));

            let prefix = format!(
                "{} uses {} on {}!",
                self.name(self.user),
                self.ability.name,
                self.name(target)
            );
            if healed > 0 {
                self.log(format!("{} Heals {} HP!", prefix, healed));
                self.events.publish(&BattleEvent::HealingReceived {
                    target,
                    amount: healed,
                });
            } else {
                self.log(format!("{} Already at full HP.", prefix));
            }

            self.report.outcomes.push(TargetOutcome {
                healed,
                ..TargetOutcome::new(target)
            });
        }
    }

    fn damage(&mut self, targets: &[CharacterId]) {
        for &target in targets {
            if !self.alive(target) {
                continue;
            }
            let text = format!(
                "{} uses {} on {}!",
                self.name(self.user),
                self.ability.name,
                self.name(target)
            );
            self.log(text);

            if let Some(mut outcome) = self.strike(target) {
                self.check_defeated(&mut outcome);
                self.report.outcomes.push(outcome);
            }
        }
    }

    fn utility(&mut self, targets: &[CharacterId]) {
        for &target in targets {
            self.announce(target);
            let text = format!("{} uses {}!", self.name(self.user), self.ability.name);
            self.log(text);
            self.report.outcomes.push(TargetOutcome::new(target));
        }
    }

    // --- Hit resolution ---

    /// Announce and resolve every hit on one living target. Mark scales the
    /// rolled damage before the Shield soaks it. Stops early once the target
    /// drops.
    fn strike(&mut self, target: CharacterId) -> Option<TargetOutcome> {
        let user_stats = self.field.get(self.user)?.stats;
        let target_stats = self.field.get(target).filter(|c| c.is_alive())?.stats;

        self.announce(target);
        let mut outcome = TargetOutcome::new(target);
        let damage_type = self.ability.damage_type;

        for hit_number in 1..=self.ability.hit_count {
            let hit = resolve_hit_with_rng(&user_stats, &target_stats, self.ability, self.config, &mut *self.rng);
            self.events.publish(&BattleEvent::HitResolved {
                target,
                hit,
                damage_type,
            });
            self.log_hit(target, &hit, hit_number);
            outcome.hits.push(hit);

            if !hit.is_effective() {
                continue;
            }

            let Some(c) = self.field.get_mut(target) else {
                break;
            };
            let marked = apply_mark_bonus(hit.damage, c, &self.config.status);
            let final_damage = absorb_damage(c, target, marked, self.events);
            c.take_damage(final_damage);
            let down = !c.is_alive();

            outcome.damage += final_damage;
            self.events.publish(&BattleEvent::DamageDealt {
                target,
                amount: final_damage,
                damage_type,
            });

            if down {
                break;
            }
        }

        Some(outcome)
    }

    fn log_hit(&mut self, target: CharacterId, hit: &HitResult, hit_number: u32) {
        let prefix = if self.ability.hit_count > 1 {
            format!("Hit {}: ", hit_number)
        } else {
            String::new()
        };

        let text = if hit.missed {
            format!("{}{} missed!", prefix, self.name(self.user))
        } else if hit.dodged {
            format!("{}{} dodged!", prefix, self.name(target))
        } else if hit.is_crit {
            format!("{}CRITICAL! {} damage!", prefix, hit.damage)
        } else {
            format!("{}{} damage!", prefix, hit.damage)
        };
        self.log(text);
    }

    fn check_defeated(&mut self, outcome: &mut TargetOutcome) {
        if self.alive(outcome.target) {
            return;
        }
        outcome.defeated = true;
        let text = format!("{} was defeated!", self.name(outcome.target));
        self.log(text);
        self.events.publish(&BattleEvent::CharacterDefeated {
            character: outcome.target,
        });
    }
}
