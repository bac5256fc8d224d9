//! Idle fading of on-screen text.
//!
//! Every committed character is kept together with where and when it was
//! typed. Once the writer pauses for longer than `blank_timeout`, the body is
//! repainted darker one step per `fade_interval` until it disappears. The
//! next keystroke brings everything back at full brightness.

use std::io;
use std::time::{Duration, Instant};

use crate::config::WriterConfig;
use crate::session::view::{GridPos, Viewport};
use crate::ui::surface::{Surface, TextStyle};
use crate::ui::theme::FULL_BRIGHTNESS;

/// One committed unit of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedChar {
    pub value: char,
    pub position: GridPos,
    pub captured_at: Instant,
}

/// Fade timing, usually taken from [`WriterConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSettings {
    pub blank_timeout: Duration,
    pub steps: u16,
    pub interval: Duration,
}

impl From<&WriterConfig> for FadeSettings {
    fn from(config: &WriterConfig) -> Self {
        Self {
            blank_timeout: config.blank_timeout(),
            steps: config.fade_steps.max(1),
            interval: config.fade_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeState {
    pub last_input_time: Instant,
    pub blanked: bool,
    pub current_fade_step: u16,
    pub last_fade_tick_time: Option<Instant>,
}

/// What a call to [`FadeModel::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTick {
    /// Nothing to do yet.
    Idle,
    /// Text repainted at the brightness of `step`.
    Dimmed { step: u16 },
    /// Text cleared for good.
    Blanked,
}

/// Gray level for a fade step: linear from near full at step 0 down to
/// exactly zero at the last step.
pub fn fade_level(step: u16, steps: u16) -> u8 {
    let steps = steps.max(1);
    if step + 1 >= steps {
        return 0;
    }
    let remaining = u32::from(steps - 1 - step);
    (u32::from(FULL_BRIGHTNESS) * remaining / u32::from(steps)) as u8
}

pub struct FadeModel {
    settings: FadeSettings,
    state: FadeState,
    chars: Vec<CapturedChar>,
}

impl FadeModel {
    pub fn new(settings: FadeSettings, now: Instant) -> Self {
        Self {
            settings,
            state: FadeState {
                last_input_time: now,
                blanked: false,
                current_fade_step: 0,
                last_fade_tick_time: None,
            },
            chars: Vec::new(),
        }
    }

    pub fn state(&self) -> &FadeState {
        &self.state
    }

    pub fn settings(&self) -> &FadeSettings {
        &self.settings
    }

    pub fn captured(&self) -> &[CapturedChar] {
        &self.chars
    }

    /// Captured characters replayed in order.
    pub fn captured_text(&self) -> String {
        self.chars.iter().map(|c| c.value).collect()
    }

    /// True while text is partially dimmed or fully blank.
    pub fn is_stale(&self) -> bool {
        self.state.blanked || self.state.current_fade_step > 0
    }

    /// Advance the fade by at most one step.
    pub fn tick(
        &mut self,
        now: Instant,
        surface: &mut dyn Surface,
        view: &Viewport,
    ) -> io::Result<FadeTick> {
        if self.state.blanked {
            return Ok(FadeTick::Idle);
        }
        let idle = now.saturating_duration_since(self.state.last_input_time);
        if idle <= self.settings.blank_timeout {
            return Ok(FadeTick::Idle);
        }
        if let Some(last) = self.state.last_fade_tick_time {
            if now.saturating_duration_since(last) < self.settings.interval {
                return Ok(FadeTick::Idle);
            }
        }
        self.state.last_fade_tick_time = Some(now);

        let cursor = surface.cursor();
        view.clear(surface)?;
        let step = self.state.current_fade_step;
        let outcome = if step + 1 >= self.settings.steps {
            self.state.blanked = true;
            tracing::debug!(chars = self.chars.len(), "text blanked");
            FadeTick::Blanked
        } else {
            let level = fade_level(step, self.settings.steps);
            self.paint_all(surface, view, TextStyle::Faded(level))?;
            self.state.current_fade_step = step + 1;
            FadeTick::Dimmed { step }
        };
        surface.set_cursor(cursor)?;
        Ok(outcome)
    }

    /// Repaint everything at full brightness and end any fade.
    pub fn restore(&mut self, surface: &mut dyn Surface, view: &Viewport) -> io::Result<()> {
        let cursor = surface.cursor();
        view.clear(surface)?;
        self.paint_all(surface, view, TextStyle::Body)?;
        self.state.blanked = false;
        self.state.current_fade_step = 0;
        surface.set_cursor(cursor)
    }

    /// Repaint at the current fade level, e.g. after a resize.
    pub fn repaint(&self, surface: &mut dyn Surface, view: &Viewport) -> io::Result<()> {
        let cursor = surface.cursor();
        view.clear(surface)?;
        if !self.state.blanked {
            let style = match self.state.current_fade_step {
                0 => TextStyle::Body,
                step => TextStyle::Faded(fade_level(step - 1, self.settings.steps)),
            };
            self.paint_all(surface, view, style)?;
        }
        surface.set_cursor(cursor)
    }

    /// Commit a character: bring stale text back, log it, paint it.
    pub fn record(
        &mut self,
        value: char,
        position: GridPos,
        now: Instant,
        surface: &mut dyn Surface,
        view: &Viewport,
    ) -> io::Result<()> {
        if self.is_stale() {
            self.restore(surface, view)?;
        }
        let captured = CapturedChar {
            value,
            position,
            captured_at: now,
        };
        self.chars.push(captured);
        self.state.last_input_time = now;
        self.state.current_fade_step = 0;
        self.state.blanked = false;
        paint(&captured, surface, view, TextStyle::Body)
    }

    fn paint_all(
        &self,
        surface: &mut dyn Surface,
        view: &Viewport,
        style: TextStyle,
    ) -> io::Result<()> {
        for captured in &self.chars {
            paint(captured, surface, view, style)?;
        }
        Ok(())
    }
}

fn paint(
    captured: &CapturedChar,
    surface: &mut dyn Surface,
    view: &Viewport,
    style: TextStyle,
) -> io::Result<()> {
    if captured.value == '\n' {
        return Ok(());
    }
    let Some(pos) = view.project(captured.position) else {
        return Ok(());
    };
    let mut buf = [0u8; 4];
    surface.write(captured.value.encode_utf8(&mut buf), pos, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::Rect;
    use crate::ui::surface::{MemorySurface, Position};

    const STEP: Duration = Duration::from_millis(100);

    fn settings() -> FadeSettings {
        FadeSettings {
            blank_timeout: Duration::from_secs(5),
            steps: 4,
            interval: STEP,
        }
    }

    fn view() -> Viewport {
        Viewport::new(Rect {
            x: 0,
            y: 1,
            width: 20,
            height: 4,
        })
    }

    fn typed(model: &mut FadeModel, text: &str, now: Instant, surface: &mut MemorySurface) {
        let view = view();
        for (col, ch) in text.chars().enumerate() {
            model
                .record(ch, GridPos::new(0, col), now, surface, &view)
                .unwrap();
        }
    }

    #[test]
    fn settings_come_from_writer_config() {
        let writer = WriterConfig {
            blank_timeout: 2.0,
            fade_steps: 0,
            fade_interval: 0.25,
            ..WriterConfig::default()
        };
        let model = FadeModel::new(FadeSettings::from(&writer), Instant::now());
        assert_eq!(model.settings().blank_timeout, Duration::from_secs(2));
        assert_eq!(model.settings().steps, 1);
        assert_eq!(model.settings().interval, Duration::from_millis(250));
    }

    #[test]
    fn fade_level_is_linear_and_ends_at_zero() {
        assert_eq!(fade_level(0, 32), 247);
        assert_eq!(fade_level(30, 32), 7);
        assert_eq!(fade_level(31, 32), 0);
        assert_eq!(fade_level(0, 1), 0);
        let levels: Vec<u8> = (0..32).map(|step| fade_level(step, 32)).collect();
        assert!(levels.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn idle_before_timeout() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "test", start, &mut surface);
        let outcome = model
            .tick(start + Duration::from_secs(5), &mut surface, &view())
            .unwrap();
        assert_eq!(outcome, FadeTick::Idle);
        assert_eq!(surface.row_text(1), "test");
    }

    #[test]
    fn dims_then_blanks() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "test", start, &mut surface);

        let mut now = start + Duration::from_millis(5_050);
        let mut outcomes = Vec::new();
        for _ in 0..4 {
            outcomes.push(model.tick(now, &mut surface, &view()).unwrap());
            now += STEP;
        }
        assert_eq!(
            outcomes,
            vec![
                FadeTick::Dimmed { step: 0 },
                FadeTick::Dimmed { step: 1 },
                FadeTick::Dimmed { step: 2 },
                FadeTick::Blanked,
            ]
        );
        assert!(model.state().blanked);
        assert_eq!(surface.row_text(1), "");
    }

    #[test]
    fn dimmed_text_uses_fade_level() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "ab", start, &mut surface);
        model
            .tick(start + Duration::from_secs(6), &mut surface, &view())
            .unwrap();
        let cell = surface.cell(Position::new(1, 0)).unwrap();
        assert_eq!(cell.style, TextStyle::Faded(fade_level(0, 4)));
    }

    #[test]
    fn fast_ticks_advance_once_per_interval() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "x", start, &mut surface);

        let first = start + Duration::from_millis(5_001);
        model.tick(first, &mut surface, &view()).unwrap();
        for ms in [10, 40, 99] {
            let outcome = model
                .tick(first + Duration::from_millis(ms), &mut surface, &view())
                .unwrap();
            assert_eq!(outcome, FadeTick::Idle);
        }
        assert_eq!(model.state().current_fade_step, 1);
        model.tick(first + STEP, &mut surface, &view()).unwrap();
        assert_eq!(model.state().current_fade_step, 2);
    }

    #[test]
    fn record_restores_blank_text() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "test", start, &mut surface);
        let mut now = start + Duration::from_secs(6);
        for _ in 0..4 {
            model.tick(now, &mut surface, &view()).unwrap();
            now += STEP;
        }
        assert!(model.state().blanked);

        model
            .record('!', GridPos::new(0, 4), now, &mut surface, &view())
            .unwrap();
        assert!(!model.state().blanked);
        assert_eq!(model.state().current_fade_step, 0);
        assert_eq!(surface.row_text(1), "test!");
        assert!(surface
            .painted()
            .all(|(_, cell)| cell.style == TextStyle::Body));
    }

    #[test]
    fn blanked_model_ignores_ticks() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        let mut now = start + Duration::from_secs(6);
        for _ in 0..4 {
            model.tick(now, &mut surface, &view()).unwrap();
            now += STEP;
        }
        let before = *model.state();
        assert_eq!(model.tick(now + STEP, &mut surface, &view()).unwrap(), FadeTick::Idle);
        assert_eq!(*model.state(), before);
    }

    #[test]
    fn tick_keeps_cursor_in_place() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        typed(&mut model, "word", start, &mut surface);
        surface.set_cursor(Position::new(1, 4)).unwrap();
        model
            .tick(start + Duration::from_secs(6), &mut surface, &view())
            .unwrap();
        assert_eq!(surface.cursor(), Position::new(1, 4));
    }

    #[test]
    fn newlines_are_kept_but_not_painted() {
        let start = Instant::now();
        let mut surface = MemorySurface::new(20, 6);
        let mut model = FadeModel::new(settings(), start);
        let view = view();
        model.record('a', GridPos::new(0, 0), start, &mut surface, &view).unwrap();
        model.record('\n', GridPos::new(0, 1), start, &mut surface, &view).unwrap();
        model.record('b', GridPos::new(1, 0), start, &mut surface, &view).unwrap();
        assert_eq!(model.captured_text(), "a\nb");
        assert_eq!(surface.painted().count(), 2);
    }
}
