use iced::{
    Alignment::Center,
    Element,
    widget::{column, container, text},
};

pub fn view<'a, Message: 'a>(error: Option<&'a str>) -> Element<'a, Message> {
    let content = match error {
        Some(error) => column![
            text("Could not start").size(24),
            text(error).style(text::danger),
        ]
        .spacing(12)
        .align_x(Center),
        None => column![text("Loading...")],
    };

    container(content)
        .center_x(iced::Length::Fill)
        .center_y(iced::Length::Fill)
        .into()
}
