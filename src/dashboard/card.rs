//! Card composition
//!
//! A card stacks up to three pre-rendered slots (header, body, footer) on a
//! white panel.

use crate::chart::surface::{Color, DrawingSurface, Paint, TextAnchor, TextStyle};
use crate::chart::{Point, SvgSurface};

const PADDING: f64 = 24.0;
const GAP: f64 = 16.0;

pub struct Card {
    width: f64,
    header: Option<SvgSurface>,
    body: Option<SvgSurface>,
    footer: Option<SvgSurface>,
}

impl Card {
    pub fn builder(width: f64) -> CardBuilder {
        CardBuilder {
            card: Card {
                width,
                header: None,
                body: None,
                footer: None,
            },
        }
    }

    fn slots(&self) -> impl Iterator<Item = &SvgSurface> {
        [&self.header, &self.body, &self.footer]
            .into_iter()
            .flatten()
    }

    /// Total height including padding
    pub fn height(&self) -> f64 {
        let slots: Vec<f64> = self.slots().map(|s| s.size().1).collect();
        let gaps = slots.len().saturating_sub(1) as f64 * GAP;
        PADDING * 2.0 + slots.iter().sum::<f64>() + gaps
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn render(&self) -> SvgSurface {
        let mut out = SvgSurface::new(self.width, self.height());
        out.rect(0.0, 0.0, self.width, self.height(), 12.0, &Paint::Solid(Color::WHITE));

        let mut y = PADDING;
        for slot in self.slots() {
            out.embed(slot, PADDING, y);
            y += slot.size().1 + GAP;
        }
        out
    }
}

pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    pub fn header(mut self, header: SvgSurface) -> Self {
        self.card.header = Some(header);
        self
    }

    /// Header slot holding a title and an optional right-aligned subtitle
    pub fn title(self, title: &str, subtitle: Option<&str>) -> Self {
        let width = self.card.width - PADDING * 2.0;
        let mut header = SvgSurface::new(width, 28.0);
        header.text(
            Point::new(0.0, 20.0),
            title,
            &TextStyle::new(Color::GRAY_900, 18.0)
                .bold()
                .anchor(TextAnchor::Start),
        );
        if let Some(subtitle) = subtitle {
            header.text(
                Point::new(width, 20.0),
                subtitle,
                &TextStyle::new(Color::GRAY_500, 12.0).anchor(TextAnchor::End),
            );
        }
        self.header(header)
    }

    pub fn body(mut self, body: SvgSurface) -> Self {
        self.card.body = Some(body);
        self
    }

    pub fn footer(mut self, footer: SvgSurface) -> Self {
        self.card.footer = Some(footer);
        self
    }

    pub fn build(self) -> Card {
        self.card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_card_is_padding_only() {
        let card = Card::builder(300.0).build();
        assert_eq!(card.height(), PADDING * 2.0);
    }

    #[test]
    fn test_slots_stack_in_order() {
        let card = Card::builder(448.0)
            .title("Revenue Breakdown", Some("This month"))
            .body(SvgSurface::new(400.0, 200.0))
            .footer(SvgSurface::new(400.0, 40.0))
            .build();
        assert_eq!(card.height(), PADDING * 2.0 + 28.0 + 200.0 + 40.0 + GAP * 2.0);

        let svg = card.render().finish();
        let header = svg.find("Revenue Breakdown").unwrap();
        let body = svg.find("translate(24 68)").unwrap();
        let footer = svg.find("translate(24 284)").unwrap();
        assert!(header < body && body < footer);
    }
}
