use iced::{
    Alignment::Center,
    Element, Length,
    alignment::Horizontal,
    widget::{Row, button, column, container, row, scrollable, text},
};

use crate::core::{Amenity, Listing};

pub const APP_NAME: &str = "Premium Room Finder";

/// Navbar with the application name and `actions`, over a scrollable body.
pub fn layout<'a, Message>(
    actions: Vec<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    let navbar = container(
        row![
            text(APP_NAME).size(22),
            container(Row::with_children(actions).spacing(8).align_y(Center))
                .width(Length::Fill)
                .align_x(Horizontal::Right),
        ]
        .align_y(Center),
    )
    .padding([12, 20])
    .width(Length::Fill)
    .style(container::bordered_box);

    column![
        navbar,
        scrollable(container(main_content.into()).padding(20).width(Length::Fill))
            .height(Length::Fill),
    ]
    .into()
}

/// Dismissible error banner.
pub fn notice<'a, Message>(message: &'a str, on_dismiss: Message) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    container(
        row![
            text(message).style(text::danger).width(Length::Fill),
            button(text("Dismiss")).on_press(on_dismiss).style(button::text),
        ]
        .spacing(12)
        .align_y(Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

/// Amenity badges, cut off after `limit` with a "+N more" marker.
pub fn amenity_badges<'a, Message>(amenities: &[Amenity], limit: Option<usize>) -> Element<'a, Message>
where
    Message: 'a,
{
    let shown = limit.unwrap_or(amenities.len()).min(amenities.len());
    let mut badges = Row::new().spacing(6);
    for amenity in &amenities[..shown] {
        badges = badges.push(
            container(text(amenity.name()).size(12))
                .padding([2, 8])
                .style(container::bordered_box),
        );
    }
    if amenities.len() > shown {
        badges = badges.push(text(format!("+{} more", amenities.len() - shown)).size(12));
    }
    badges.into()
}

pub fn price_line<'a, Message>(listing: &Listing) -> Element<'a, Message>
where
    Message: 'a,
{
    row![
        text(format!("₹{}/month", listing.rent)).size(18),
        text(format!("Deposit ₹{}", listing.deposit)).size(13),
    ]
    .spacing(12)
    .align_y(Center)
    .into()
}

pub fn rating_line(listing: &Listing) -> Option<String> {
    let rating = listing.rating?;
    Some(match listing.reviews {
        Some(reviews) => format!("★ {rating:.1} ({reviews} reviews)"),
        None => format!("★ {rating:.1}"),
    })
}

/// "Image 2 of 3" caption with the image reference.
pub fn image_caption(listing: &Listing, position: usize) -> String {
    match listing.images.get(position) {
        Some(image) => format!("Image {} of {}: {}", position + 1, listing.images.len(), image),
        None => "No images".to_string(),
    }
}
