//! Outfits offered in the lobby.
//!
//! A skin is a description template; `_NAME_` is replaced by the player's
//! nickname whenever the player is described.

use tocs_world::Team;

/// A named outfit and its description template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    /// Label shown in the menu.
    pub label: &'static str,
    /// Description template containing `_NAME_`.
    pub template: &'static str,
}

const TERRORIST_SKINS: [Skin; 4] = [
    Skin {
        label: "Mafia Don",
        template: "_NAME_ looks like a mafia don, wearing a genteel pinstripe suit and smoking a cigar.",
    },
    Skin {
        label: "Desert Raider",
        template: "_NAME_ is wrapped in sand-coloured cloth, a chest rig full of magazines strapped over a worn tunic.",
    },
    Skin {
        label: "Ukrainian Separatist",
        template: "The Ukrainian _NAME_ wears a seedy jacket and has a dusty old firearm in the hands.",
    },
    Skin {
        label: "Yakuza Hitman",
        template: "This killer moves quick and precisely. Only a missing finger indicates that _NAME_ is a Yakuza hitman.",
    },
];

const COUNTER_TERRORIST_SKINS: [Skin; 4] = [
    Skin {
        label: "SEAL Team 6",
        template: "_NAME_ is a fully armed member of the SEAL Team 6, wearing an olive green one-piece suit with heavy grey protectors all over the body.",
    },
    Skin {
        label: "GSG-9",
        template: "_NAME_ is obviously a member of the German GSG-9 forces, wearing nothing but black clothes and bags. This makes _NAME_ almost invisible when camping in the shadow.",
    },
    Skin {
        label: "Spetsnaz",
        template: "_NAME_ is wearing grey-camouflaged combat fatigues paired with a kevlar assault suit with the word 'Spetsnaz' in cyrillic letters.",
    },
    Skin {
        label: "Israel Defense Force",
        template: "Hidden behind strong armour, _NAME_'s eyes are barely visible. Ponderously, _NAME_ finds a way through the area.",
    },
];

/// Returns the skins available to `team`.
#[must_use]
pub const fn skins(team: Team) -> &'static [Skin] {
    match team {
        Team::Terrorists => &TERRORIST_SKINS,
        Team::CounterTerrorists => &COUNTER_TERRORIST_SKINS,
    }
}
