use std::fmt;
use std::str::FromStr;
use novel_engine::ui::gallery::GalleryEntry;
use novel_engine::*;

use crate::scenes::ending::EndingScene;
use crate::scenes::fin::FinScene;
use crate::scenes::intro::IntroScene;
use crate::scenes::story::StoryScene;
use crate::scenes::title::TitleScene;
use crate::script::{embedded_manifest, Story};

/// Every screen of the game. The lowercase names are what the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Title,
    Intro,
    Game,
    End1,
    End2,
    End3,
    Fin,
}

impl SceneKind {
    pub const ALL: [SceneKind; 7] = [
        Self::Title,
        Self::Intro,
        Self::Game,
        Self::End1,
        Self::End2,
        Self::End3,
        Self::Fin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Intro => "intro",
            Self::Game => "game",
            Self::End1 => "end1",
            Self::End2 => "end2",
            Self::End3 => "end3",
            Self::Fin => "fin",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SceneError::UnknownScene(s.to_string()))
    }
}

impl From<GalleryEntry> for SceneKind {
    fn from(entry: GalleryEntry) -> Self {
        match entry {
            GalleryEntry::Intro => Self::Intro,
            GalleryEntry::Main => Self::Game,
            GalleryEntry::End1 => Self::End1,
            GalleryEntry::End2 => Self::End2,
            GalleryEntry::End3 => Self::End3,
        }
    }
}

/// The Mask visual novel: seven scenes sharing one manifest and script.
pub struct MaskNovel {
    manifest: AssetManifest,
    story: Story,
}

impl MaskNovel {
    /// Build from the data compiled into the crate. Bad data is logged and
    /// replaced by empty defaults; scenes that need it then fail to build and
    /// the manager falls back to the title.
    pub fn new() -> Self {
        let manifest = AssetManifest::from_json(embedded_manifest()).unwrap_or_else(|err| {
            log::error!("{}", err);
            AssetManifest::default()
        });
        let story = Story::embedded().unwrap_or_else(|err| {
            log::error!("{}", err);
            Story::default()
        });
        Self { manifest, story }
    }

    #[cfg(test)]
    pub fn from_sources(story_json: &str, manifest_json: &str) -> Result<Self, SceneError> {
        Ok(Self {
            manifest: AssetManifest::from_json(manifest_json)?,
            story: Story::from_json(story_json)?,
        })
    }
}

impl Default for MaskNovel {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFactory for MaskNovel {
    type Kind = SceneKind;

    fn initial(&self) -> SceneKind {
        SceneKind::Title
    }

    fn fallback(&self) -> Option<SceneKind> {
        Some(SceneKind::Title)
    }

    fn create(
        &mut self,
        kind: SceneKind,
        init: SceneInit,
        ctx: &mut SceneContext<'_, SceneKind>,
    ) -> Result<Box<dyn Scene<SceneKind>>, SceneError> {
        let story = &self.story;
        let manifest = &self.manifest;
        Ok(match kind {
            SceneKind::Title => Box::new(TitleScene::new(&init, ctx, &story.credits)),
            SceneKind::Intro => Box::new(IntroScene::new(&init, ctx)),
            SceneKind::Game => Box::new(StoryScene::new(&init, ctx, manifest, &story.main)?),
            SceneKind::End1 => Box::new(EndingScene::new(kind, &init, ctx, manifest, &story.end1, false)?),
            SceneKind::End2 => Box::new(EndingScene::new(kind, &init, ctx, manifest, &story.end2, false)?),
            SceneKind::End3 => Box::new(EndingScene::new(kind, &init, ctx, manifest, &story.end3, true)?),
            SceneKind::Fin => Box::new(FinScene::new(&init, ctx, manifest)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Just past the delay before the third choice shows up.
    const HIDDEN_CHOICE_WAIT: f32 = 5.05;

    fn boot() -> SceneManager<MaskNovel> {
        let mut manager = SceneManager::new(MaskNovel::new());
        manager.boot();
        settle_pending(&mut manager);
        manager
    }

    /// Answer every outstanding async texture the way the page would.
    fn settle_pending(manager: &mut SceneManager<MaskNovel>) {
        let pending: Vec<TextureId> = manager
            .drain_host_commands()
            .into_iter()
            .filter_map(|c| match c {
                HostCommand::CreateTexture { id, content, .. } if content.is_async() => Some(id),
                _ => None,
            })
            .collect();
        for id in pending {
            manager.asset_settled(id, AssetOutcome::Loaded { width: 1920.0, height: 1080.0 });
        }
    }

    fn click_at(manager: &mut SceneManager<MaskNovel>, pos: Vec2) {
        let half = manager.screen().half();
        manager.dispatch(&InputEvent::Click { x: pos.x / half.x, y: pos.y / half.y, button: PointerButton::Primary });
        settle_pending(manager);
    }

    fn click_tag(manager: &mut SceneManager<MaskNovel>, tag: &str) {
        let pos = manager.stage().and_then(|s| s.find_by_tag(tag)).map(|q| q.pos).unwrap();
        click_at(manager, pos);
    }

    fn play_through_main(manager: &mut SceneManager<MaskNovel>) {
        click_tag(manager, "スタート");
        assert_eq!(manager.current_kind(), Some(SceneKind::Intro));
        for _ in 0..3 {
            click_at(manager, Vec2::new(0.0, 200.0));
        }
        assert_eq!(manager.current_kind(), Some(SceneKind::Game));
        assert!(!manager.is_loading());
        for _ in 0..7 {
            click_tag(manager, "dialogue");
            click_tag(manager, "dialogue");
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.to_string().parse::<SceneKind>().unwrap(), kind);
        }
        assert!(matches!("credits".parse::<SceneKind>(), Err(SceneError::UnknownScene(_))));
    }

    #[test]
    fn gallery_entries_map_to_scenes() {
        assert_eq!(SceneKind::from(GalleryEntry::Main), SceneKind::Game);
        assert_eq!(SceneKind::from(GalleryEntry::End3), SceneKind::End3);
    }

    #[test]
    fn title_to_third_ending() {
        let mut manager = boot();
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));
        assert!(!manager.is_loading());

        play_through_main(&mut manager);
        let visible = |m: &SceneManager<MaskNovel>, tag: &str| m.stage().and_then(|s| s.find_by_tag(tag)).is_some_and(|q| q.visible);
        assert!(visible(&manager, "END1") && visible(&manager, "END2"));
        assert!(!visible(&manager, "END3"));

        manager.tick(HIDDEN_CHOICE_WAIT);
        assert!(visible(&manager, "END3"));
        click_tag(&mut manager, "END3");
        assert_eq!(manager.current_kind(), Some(SceneKind::End3));
        assert!(!manager.is_loading());
        assert!(manager.audio().is_bgm_playing());
    }

    #[test]
    fn second_ending_leads_to_fin_and_back() {
        let mut manager = boot();
        play_through_main(&mut manager);
        click_tag(&mut manager, "END2");
        assert_eq!(manager.current_kind(), Some(SceneKind::End2));

        click_tag(&mut manager, "dialogue");
        click_tag(&mut manager, "dialogue");
        assert_eq!(manager.current_kind(), Some(SceneKind::Fin));

        click_at(&mut manager, Vec2::new(-300.0, 200.0));
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));
        assert!(!manager.audio().is_bgm_playing());
    }

    #[test]
    fn page_can_jump_anywhere_and_unknown_names_fall_back() {
        let mut manager = boot();
        manager.change_scene_by_name("fin").unwrap();
        assert_eq!(manager.current_kind(), Some(SceneKind::Fin));
        assert!(manager.change_scene_by_name("credits").is_err());
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));
    }

    #[test]
    fn broken_script_falls_back_to_title() {
        let mut manager = SceneManager::new(
            MaskNovel::from_sources(r#"{ "main": [], "end1": [], "end2": [], "end3": [] }"#, embedded_manifest()).unwrap(),
        );
        manager.boot();
        settle_pending(&mut manager);
        manager.change_scene(SceneKind::Game);
        assert_eq!(manager.current_kind(), Some(SceneKind::Title));
        let failed = manager
            .drain_host_commands()
            .into_iter()
            .any(|c| matches!(c, HostCommand::SceneFailed { scene, .. } if scene == "game"));
        assert!(failed);
    }

    #[test]
    fn every_scene_releases_its_textures() {
        let mut manager = boot();
        let baseline = manager.host().texture_count();
        for kind in SceneKind::ALL {
            manager.change_scene(kind);
            settle_pending(&mut manager);
            assert_eq!(manager.current_kind(), Some(kind));
        }
        manager.change_scene(SceneKind::Title);
        settle_pending(&mut manager);
        assert_eq!(manager.host().texture_count(), baseline);
    }
}
