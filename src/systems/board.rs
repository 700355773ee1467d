// src/systems/board.rs

//! The registry a theory declares its entities on.
//!
//! Holds the single currency, `tau` (the highest currency value reached),
//! the publication state and every upgrade, milestone, permanent,
//! achievement and story chapter. Purchases and publication go through here.

use crate::error::{EntityKind, Result, TheoryError};
use crate::numeric::BigNumber;
use crate::systems::cost::Cost;
use crate::systems::progress::{Achievement, AchievementCategory, Condition, StoryChapter, Unlocked};
use crate::systems::sdk::Event;
use crate::systems::upgrade::{MilestoneUpgrade, PermanentKind, PermanentUpgrade, Upgrade};

#[derive(Clone, Debug)]
pub struct Board {
    currency: BigNumber,
    tau: BigNumber,
    latex_symbol: String,
    publication_multiplier: BigNumber,
    publications: u32,
    upgrades: Vec<Upgrade>,
    milestones: Vec<MilestoneUpgrade>,
    milestone_cost: Cost,
    permanents: Vec<PermanentUpgrade>,
    categories: Vec<AchievementCategory>,
    achievements: Vec<Achievement>,
    chapters: Vec<StoryChapter>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            currency: BigNumber::ZERO,
            tau: BigNumber::ZERO,
            latex_symbol: "\\tau".to_string(),
            publication_multiplier: BigNumber::ONE,
            publications: 0,
            upgrades: Vec::new(),
            milestones: Vec::new(),
            milestone_cost: Cost::linear(1.0, 1.0),
            permanents: Vec::new(),
            categories: Vec::new(),
            achievements: Vec::new(),
            chapters: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Currency & publication state
    // ---------------------------------------------------------------------

    pub fn currency(&self) -> BigNumber {
        self.currency
    }

    pub fn tau(&self) -> BigNumber {
        self.tau
    }

    pub fn latex_symbol(&self) -> &str {
        &self.latex_symbol
    }

    pub fn publication_multiplier(&self) -> BigNumber {
        self.publication_multiplier
    }

    pub fn publications(&self) -> u32 {
        self.publications
    }

    /// Adds production and raises `tau` if the new value is a record.
    pub fn add_currency(&mut self, amount: BigNumber) {
        self.currency += amount;
        self.tau = self.tau.max(self.currency);
    }

    fn spend(&mut self, kind: EntityKind, id: u32, cost: BigNumber) -> Result<()> {
        if cost > self.currency {
            return Err(TheoryError::InsufficientFunds { kind, id, cost, funds: self.currency });
        }
        self.currency -= cost;
        Ok(())
    }

    /// Resets currency and regular upgrade levels and installs the new
    /// multiplier. Milestones, permanents and progress survive.
    pub fn publish(&mut self, multiplier: BigNumber) -> Result<()> {
        if !self.owns(PermanentKind::Publication) {
            return Err(TheoryError::PublicationLocked);
        }
        self.publication_multiplier = multiplier;
        self.currency = BigNumber::ZERO;
        for u in &mut self.upgrades {
            u.level = 0;
        }
        self.publications += 1;
        tracing::info!(
            publications = self.publications,
            %multiplier,
            "published"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Regular upgrades
    // ---------------------------------------------------------------------

    pub fn create_upgrade(&mut self, upgrade: Upgrade) -> Result<()> {
        if self.upgrades.iter().any(|u| u.id == upgrade.id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Upgrade, id: upgrade.id });
        }
        self.upgrades.push(upgrade);
        Ok(())
    }

    pub fn upgrade(&self, id: u32) -> Result<&Upgrade> {
        self.upgrades
            .iter()
            .find(|u| u.id == id)
            .ok_or(TheoryError::Unknown { kind: EntityKind::Upgrade, id })
    }

    pub fn upgrade_mut(&mut self, id: u32) -> Result<&mut Upgrade> {
        self.upgrades
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(TheoryError::Unknown { kind: EntityKind::Upgrade, id })
    }

    pub fn upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter()
    }

    /// Level of a registered upgrade, 0 if the id is unknown.
    pub fn level(&self, id: u32) -> u32 {
        self.upgrade(id).map_or(0, |u| u.level)
    }

    /// Buys exactly `amount` levels or nothing.
    pub fn buy(&mut self, id: u32, amount: u32) -> Result<()> {
        let u = self.upgrade(id)?;
        if !u.available {
            return Err(TheoryError::Unavailable { kind: EntityKind::Upgrade, id });
        }
        if amount > u.remaining() {
            return Err(TheoryError::MaxLevel { kind: EntityKind::Upgrade, id });
        }
        let target = u.level + amount;
        let funds = self.currency;
        let cost = u.cost.total_within(u.level, amount, funds).map_err(|cost| {
            TheoryError::InsufficientFunds { kind: EntityKind::Upgrade, id, cost, funds }
        })?;
        self.spend(EntityKind::Upgrade, id, cost)?;
        self.upgrade_mut(id)?.level = target;
        Ok(())
    }

    /// Buys as many levels as the currency allows, capped by `limit`.
    pub fn buy_max(&mut self, id: u32, limit: u32) -> Result<u32> {
        let u = self.upgrade(id)?;
        if !u.available {
            return Ok(0);
        }
        let amount = u.cost.max_affordable(u.level, self.currency, limit.min(u.remaining()));
        if amount > 0 {
            self.buy(id, amount)?;
        }
        Ok(amount)
    }

    /// One `buy_max` per available upgrade, in declaration order.
    pub fn buy_all(&mut self, limit: u32) -> u32 {
        let ids: Vec<u32> = self.upgrades.iter().map(|u| u.id).collect();
        ids.into_iter().map(|id| self.buy_max(id, limit).unwrap_or(0)).sum()
    }

    /// Available, not maxed upgrade whose next level is cheapest and affordable.
    pub fn cheapest_affordable(&self) -> Option<u32> {
        self.upgrades
            .iter()
            .filter(|u| u.available && !u.is_maxed())
            .map(|u| (u.id, u.next_cost()))
            .filter(|(_, c)| *c <= self.currency)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }

    // ---------------------------------------------------------------------
    // Milestones
    // ---------------------------------------------------------------------

    /// Schedule over log10(tau): the i-th point is earned once
    /// `cost(i) <= log10(tau)`.
    pub fn set_milestone_cost(&mut self, cost: Cost) {
        self.milestone_cost = cost;
    }

    pub fn create_milestone(&mut self, milestone: MilestoneUpgrade) -> Result<()> {
        if self.milestones.iter().any(|m| m.id == milestone.id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Milestone, id: milestone.id });
        }
        self.milestones.push(milestone);
        Ok(())
    }

    pub fn milestone(&self, id: u32) -> Result<&MilestoneUpgrade> {
        self.milestones
            .iter()
            .find(|m| m.id == id)
            .ok_or(TheoryError::Unknown { kind: EntityKind::Milestone, id })
    }

    fn milestone_mut(&mut self, id: u32) -> Result<&mut MilestoneUpgrade> {
        self.milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TheoryError::Unknown { kind: EntityKind::Milestone, id })
    }

    pub fn milestones(&self) -> impl Iterator<Item = &MilestoneUpgrade> {
        self.milestones.iter()
    }

    /// Level of a registered milestone, 0 if the id is unknown.
    pub fn milestone_level(&self, id: u32) -> u32 {
        self.milestone(id).map_or(0, |m| m.level)
    }

    pub fn milestone_points_earned(&self) -> u32 {
        let cap: u32 = self.milestones.iter().map(|m| m.max_level).sum();
        let progress = BigNumber::from_f64(self.tau.log10());
        (0..cap).take_while(|&i| self.milestone_cost.cost(i) <= progress).count() as u32
    }

    pub fn milestone_points_spent(&self) -> u32 {
        self.milestones.iter().map(|m| m.level).sum()
    }

    pub fn milestone_points_available(&self) -> u32 {
        self.milestone_points_earned().saturating_sub(self.milestone_points_spent())
    }

    /// Returns the milestone's listeners for the caller to dispatch.
    pub fn buy_milestone(&mut self, id: u32) -> Result<Vec<Event>> {
        let m = self.milestone(id)?;
        if !m.available {
            return Err(TheoryError::Unavailable { kind: EntityKind::Milestone, id });
        }
        if m.is_maxed() {
            return Err(TheoryError::MaxLevel { kind: EntityKind::Milestone, id });
        }
        if self.milestone_points_available() == 0 {
            return Err(TheoryError::NoMilestonePoints);
        }
        let m = self.milestone_mut(id)?;
        m.level += 1;
        Ok(m.listeners.clone())
    }

    pub fn refund_milestone(&mut self, id: u32) -> Result<Vec<Event>> {
        let m = self.milestone_mut(id)?;
        if m.level == 0 {
            return Err(TheoryError::NothingToRefund(id));
        }
        m.level -= 1;
        Ok(m.listeners.clone())
    }

    // ---------------------------------------------------------------------
    // Permanent upgrades
    // ---------------------------------------------------------------------

    pub fn create_permanent(&mut self, id: u32, kind: PermanentKind, price: f64) -> Result<()> {
        if self.permanents.iter().any(|p| p.id == id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Permanent, id });
        }
        self.permanents.push(PermanentUpgrade {
            id,
            kind,
            price: BigNumber::from_f64(price),
            bought: false,
        });
        Ok(())
    }

    pub fn permanents(&self) -> impl Iterator<Item = &PermanentUpgrade> {
        self.permanents.iter()
    }

    pub fn owns(&self, kind: PermanentKind) -> bool {
        self.permanents.iter().any(|p| p.kind == kind && p.bought)
    }

    pub fn buy_permanent(&mut self, id: u32) -> Result<()> {
        let p = self
            .permanents
            .iter()
            .find(|p| p.id == id)
            .ok_or(TheoryError::Unknown { kind: EntityKind::Permanent, id })?;
        if p.bought {
            return Err(TheoryError::MaxLevel { kind: EntityKind::Permanent, id });
        }
        let price = p.price;
        self.spend(EntityKind::Permanent, id, price)?;
        if let Some(p) = self.permanents.iter_mut().find(|p| p.id == id) {
            p.bought = true;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Achievements & story
    // ---------------------------------------------------------------------

    pub fn create_achievement_category(&mut self, id: u32, name: &str) -> Result<()> {
        if self.categories.iter().any(|c| c.id == id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Category, id });
        }
        self.categories.push(AchievementCategory { id, name: name.to_string() });
        Ok(())
    }

    pub fn create_achievement(
        &mut self,
        id: u32,
        category: u32,
        name: &str,
        description: &str,
        condition: Condition,
    ) -> Result<()> {
        if !self.categories.iter().any(|c| c.id == category) {
            return Err(TheoryError::Unknown { kind: EntityKind::Category, id: category });
        }
        if self.achievements.iter().any(|a| a.id == id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Achievement, id });
        }
        self.achievements.push(Achievement {
            id,
            category,
            name: name.to_string(),
            description: description.to_string(),
            condition,
            unlocked: false,
        });
        Ok(())
    }

    pub fn create_story_chapter(
        &mut self,
        id: u32,
        title: &str,
        text: &str,
        condition: Condition,
    ) -> Result<()> {
        if self.chapters.iter().any(|c| c.id == id) {
            return Err(TheoryError::Duplicate { kind: EntityKind::Chapter, id });
        }
        self.chapters.push(StoryChapter {
            id,
            title: title.to_string(),
            text: text.to_string(),
            condition,
            unlocked: false,
        });
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = &AchievementCategory> {
        self.categories.iter()
    }

    pub fn achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }

    pub fn chapters(&self) -> impl Iterator<Item = &StoryChapter> {
        self.chapters.iter()
    }

    pub fn is_unlocked(&self, entry: Unlocked) -> bool {
        match entry {
            Unlocked::Achievement(id) => self.achievements.iter().any(|a| a.id == id && a.unlocked),
            Unlocked::Chapter(id) => self.chapters.iter().any(|c| c.id == id && c.unlocked),
        }
    }

    /// Evaluates every locked entry and unlocks those whose condition holds.
    pub fn poll_progress(&mut self) -> Vec<Unlocked> {
        let achievements: Vec<usize> = (0..self.achievements.len())
            .filter(|&i| !self.achievements[i].unlocked && self.achievements[i].condition.holds(self))
            .collect();
        let chapters: Vec<usize> = (0..self.chapters.len())
            .filter(|&i| !self.chapters[i].unlocked && self.chapters[i].condition.holds(self))
            .collect();

        let mut out = Vec::with_capacity(achievements.len() + chapters.len());
        for i in achievements {
            let a = &mut self.achievements[i];
            a.unlocked = true;
            tracing::info!(id = a.id, name = %a.name, "achievement unlocked");
            out.push(Unlocked::Achievement(a.id));
        }
        for i in chapters {
            let c = &mut self.chapters[i];
            c.unlocked = true;
            tracing::info!(id = c.id, title = %c.title, "story chapter unlocked");
            out.push(Unlocked::Chapter(c.id));
        }
        out
    }
}
