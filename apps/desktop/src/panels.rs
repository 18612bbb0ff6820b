use factlens_core::{
    AnalysisResult, Classification, Tab,
    view::{
        CorrectionView, MisconceptionsView, SourceView, misconceptions_view, summary_view,
        transcript_view,
    },
};
use iced::widget::{Column, button, column, container, row, scrollable, text};
use iced::{Color, Element, Font, Length, Theme};

use crate::Message;

const MISINFORMATION_COLOR: Color = Color::from_rgb(0.75, 0.22, 0.17);
const UNCERTAIN_COLOR: Color = Color::from_rgb(0.88, 0.66, 0.0);
const REAL_COLOR: Color = Color::from_rgb(0.18, 0.55, 0.34);

fn classification_color(classification: Classification) -> Color {
    match classification {
        Classification::Misinformation => MISINFORMATION_COLOR,
        Classification::Uncertain => UNCERTAIN_COLOR,
        Classification::Real => REAL_COLOR,
    }
}

pub fn results<'a>(result: &AnalysisResult, active: Tab) -> Element<'a, Message> {
    let tabs = Tab::ALL.into_iter().fold(row![].spacing(8), |tabs, tab| {
        let style: fn(&Theme, button::Status) -> button::Style = if tab == active {
            button::primary
        } else {
            button::secondary
        };
        tabs.push(
            button(text(tab.title()))
                .style(style)
                .on_press(Message::TabSelected(tab)),
        )
    });

    let panel = match active {
        Tab::Transcript => transcript(result),
        Tab::Misconceptions => misconceptions(result),
        Tab::Summary => summary(result),
    };

    column![tabs, scrollable(panel).height(Length::Fill)]
        .spacing(12)
        .into()
}

/// Message sent when a source is clicked. Only real links are clickable.
fn link_message(source: &SourceView) -> Option<Message> {
    match source {
        SourceView::Link { href, .. } => Some(Message::OpenLink(href.clone())),
        SourceView::Text(_) | SourceView::None => None,
    }
}

fn source<'a>(source: SourceView) -> Option<Element<'a, Message>> {
    let on_press = link_message(&source);
    match source {
        SourceView::Link { label, .. } => Some(
            button(text(format!("Source: {}", label)).size(12))
                .style(button::text)
                .padding(0)
                .on_press_maybe(on_press)
                .into(),
        ),
        SourceView::Text(label) => Some(text(format!("Source: {}", label)).size(12).into()),
        SourceView::None => None,
    }
}

fn correction<'a>(correction: CorrectionView) -> Element<'a, Message> {
    let mut col = column![text(format!("Correct fact: {}", correction.fact))].spacing(2);
    if let Some(source) = source(correction.source) {
        col = col.push(source);
    }
    col.into()
}

fn transcript<'a>(result: &AnalysisResult) -> Element<'a, Message> {
    transcript_view(result)
        .into_iter()
        .fold(Column::new().spacing(6), |col, line| {
            let mut body = column![
                row![
                    text(line.time).font(Font::MONOSPACE).width(Length::Fixed(56.0)),
                    text(line.classification.label())
                        .color(classification_color(line.classification))
                        .width(Length::Fixed(140.0)),
                    text(line.text),
                ]
                .spacing(8)
            ];
            if let Some(c) = line.correction {
                body = body.push(correction(c));
            }

            let body = container(body).padding(6).width(Length::Fill);
            let body = if line.flagged {
                body.style(container::bordered_box)
            } else {
                body
            };
            col.push(body)
        })
        .into()
}

fn misconceptions<'a>(result: &AnalysisResult) -> Element<'a, Message> {
    match misconceptions_view(result) {
        MisconceptionsView::Empty { message } => text(message).color(REAL_COLOR).into(),
        MisconceptionsView::Items(items) => items
            .into_iter()
            .fold(Column::new().spacing(8), |col, item| {
                let mut body = column![
                    row![
                        text(item.time).font(Font::MONOSPACE).width(Length::Fixed(56.0)),
                        text(item.text),
                    ]
                    .spacing(8),
                    text(format!(
                        "Confidence: {} | Severity: {}",
                        item.confidence,
                        item.severity.label()
                    ))
                    .size(12),
                ]
                .spacing(2);
                if let Some(c) = item.correction {
                    body = body.push(correction(c));
                }
                col.push(
                    container(body)
                        .padding(6)
                        .width(Length::Fill)
                        .style(container::bordered_box),
                )
            })
            .into(),
    }
}

fn summary<'a>(result: &AnalysisResult) -> Element<'a, Message> {
    let summary = summary_view(result);
    let stats = column![
        text(format!("Snippets analyzed: {}", summary.stats.total_snippets)),
        text(format!("Misinformation: {}", summary.stats.misinformation_count))
            .color(MISINFORMATION_COLOR),
        text(format!("Uncertain: {}", summary.stats.uncertain_count())).color(UNCERTAIN_COLOR),
        text(format!("Real: {}", summary.stats.real_count)).color(REAL_COLOR),
    ]
    .spacing(4);

    summary
        .facts
        .into_iter()
        .fold(column![stats].spacing(12), |col, fact| {
            let mut body = column![text(fact.term).size(16), text(fact.fact)].spacing(4);
            if let Some(source) = source(fact.source) {
                body = body.push(source);
            }
            col.push(body)
        })
        .into()
}
