//! Read-only statistics viewer, one record per page.

use super::{ignore_unknown, Context, Layout, Owned, Routine, Screen, Title};
use crate::core::stats::{clamp_page, page_view, PageView};
use crate::core::{ScreenKind, SLOTS};
use crate::registry::{ElementId, ObjectRegistry};
use crate::session::SessionError;

action_enum! {
    pub enum ReadAction {
        Back = 1,
        Previous = 2,
        Next = 3,
    }
}

#[derive(Debug)]
struct PageLabels {
    names: [ElementId; SLOTS],
    wins: [ElementId; SLOTS],
    ratios: [ElementId; SLOTS],
    total: ElementId,
    draws: ElementId,
    current: ElementId,
    count: ElementId,
}

impl PageLabels {
    fn render(&self, registry: &mut ObjectRegistry, view: &PageView) {
        for slot in 0..SLOTS {
            registry.set_text(self.names[slot], &view.names[slot]);
            registry.set_text(self.wins[slot], &view.wins[slot]);
            registry.set_text(self.ratios[slot], &view.ratios[slot]);
        }
        registry.set_text(self.total, &view.total);
        registry.set_text(self.draws, &view.draws);
        registry.set_text(self.current, &view.current);
        registry.set_text(self.count, &view.count);
    }
}

#[derive(Debug)]
pub struct ReadMode {
    pub(super) own: Owned,
    labels: PageLabels,
    page: usize,
}

impl ReadMode {
    pub fn enter(ctx: &mut Context<'_>) -> Self {
        let page = clamp_page(1, ctx.book.len());
        let view = page_view(ctx.book, page);

        let mut layout = Layout::new(ctx);
        layout.button(50, 50, "Back", ReadAction::Back.code());
        layout.button(500, 600, "\u{25c1}", ReadAction::Previous.code());
        layout.button(800, 600, "\u{25b7}", ReadAction::Next.code());

        let names = std::array::from_fn(|slot| {
            layout.label(400 + 150 * slot as i32, 100, view.names[slot].as_str())
        });
        layout.label(250, 200, "WIN");
        let wins =
            std::array::from_fn(|slot| layout.label(400 + 150 * slot as i32, 200, view.wins[slot].as_str()));
        layout.label(250, 300, "RATIO");
        let ratios = std::array::from_fn(|slot| {
            layout.label(400 + 150 * slot as i32, 300, view.ratios[slot].as_str())
        });
        layout.label(300, 400, "TOTAL");
        let total = layout.label(450, 400, view.total.as_str());
        layout.label(750, 400, "DRAW");
        let draws = layout.label(900, 400, view.draws.as_str());
        let current = layout.label(600, 600, view.current.as_str());
        layout.label(650, 600, "/");
        let count = layout.label(700, 600, view.count.as_str());

        Self {
            own: layout.finish(),
            labels: PageLabels {
                names,
                wins,
                ratios,
                total,
                draws,
                current,
                count,
            },
            page,
        }
    }

    /// The 1-based page being shown.
    pub fn page(&self) -> usize {
        self.page
    }

    fn turn(&mut self, delta: i64, records: usize) {
        let requested = i64::try_from(self.page).unwrap_or(i64::MAX).saturating_add(delta);
        self.page = clamp_page(requested, records);
    }
}

impl Screen for ReadMode {
    const KIND: ScreenKind = ScreenKind::ReadMode;

    fn execute(mut self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let records = ctx.book.len();
        match self.own.take_action().map(|code| (code, ReadAction::decode(code))) {
            Some((_, Some(ReadAction::Back))) => {
                self.own.release(ctx.registry);
                return Ok(Title::enter(ctx).into());
            }
            Some((_, Some(ReadAction::Previous))) => self.turn(-1, records),
            Some((_, Some(ReadAction::Next))) => self.turn(1, records),
            Some((code, None)) => ignore_unknown(Self::KIND, code),
            None => {}
        }

        self.labels.render(ctx.registry, &page_view(ctx.book, self.page));
        Ok(self.into())
    }
}
