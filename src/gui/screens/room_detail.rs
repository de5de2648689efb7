use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, button, column, container, row, text, text_input},
};
use tracing::{info, warn};

use crate::{
    core::{
        AppState, Carousel, InquiryForm, ListingDetail, ListingSource, Tab,
        db::{SessionGate, UiHints},
        model::ListingId,
        source::parse_room_param,
    },
    gui::{
        screens::{ParentMessage, Route, Screen, ScreenMessage, navigate, persist_favorites},
        widgets::{amenity_badges, image_caption, layout, notice, price_line, rating_line},
    },
};

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    NotFound,
    Loaded(Box<ListingDetail>),
}

#[derive(Debug, Clone)]
pub struct RoomDetailScreen {
    id: Option<ListingId>,
    phase: Phase,
    carousel: Carousel,
    inquiry: InquiryForm,
    confirm_delete: bool,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum RoomDetailMessage {
    Activated(Result<SessionGate, String>),
    Fetched(ListingId, Result<Option<ListingDetail>, String>),
    CarouselTick,
    PrevImage,
    NextImage,
    ToggleFavorite,
    InquiryName(String),
    InquiryEmail(String),
    InquiryPhone(String),
    InquiryMessage(String),
    InquiryDate(String),
    SubmitInquiry,
    Edit,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    Back,
    ShowFavorites,
    HintSaved(Route, Result<(), String>),
    DismissNotice,
}

fn msg(message: RoomDetailMessage) -> ScreenMessage<RoomDetailScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl RoomDetailScreen {
    /// `param` is the raw route parameter. The listing is fetched once the
    /// session check passes.
    pub fn open(param: &str, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let store = state.store();
        (
            Self {
                id: parse_room_param(param),
                phase: Phase::Loading,
                carousel: Carousel::new(),
                inquiry: InquiryForm::default(),
                confirm_delete: false,
                notice: None,
            },
            Task::perform(
                async move { SessionGate::check(&*store).await.map_err(|e| format!("{e:#}")) },
                |gate| msg(RoomDetailMessage::Activated(gate)),
            ),
        )
    }

    /// The listing title once it has loaded.
    pub fn title(&self) -> Option<&str> {
        self.detail().map(|detail| detail.listing.title.as_str())
    }

    fn detail(&self) -> Option<&ListingDetail> {
        match &self.phase {
            Phase::Loaded(detail) => Some(detail.as_ref()),
            Phase::Loading | Phase::NotFound => None,
        }
    }

    fn image_count(&self) -> usize {
        self.detail().map_or(0, |detail| detail.listing.images.len())
    }

    fn fetch(&mut self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let Some(id) = self.id else {
            self.phase = Phase::NotFound;
            return Task::none();
        };
        let source = state.listing_source();
        Task::perform(
            async move { source.fetch_listing(id).await.map_err(|e| format!("{e:#}")) },
            move |fetched| msg(RoomDetailMessage::Fetched(id, fetched)),
        )
    }

    /// Persists a transient hint for the dashboard, then goes there.
    fn leave_with_hint(&self, state: &AppState, hint: Hint) -> Task<ScreenMessage<Self>> {
        let store = state.store();
        Task::perform(
            async move {
                let saved = match hint {
                    Hint::Tab(tab) => store.set_active_tab_hint(tab).await,
                    Hint::Edit(id) => store.set_edit_hint(id).await,
                };
                saved.map_err(|e| format!("{e:#}"))
            },
            |saved| msg(RoomDetailMessage::HintSaved(Route::Dashboard, saved)),
        )
    }

    fn submit_inquiry(&mut self) {
        let Some(id) = self.id else {
            return;
        };
        match self.inquiry.submit(id) {
            Ok(receipt) => {
                info!(
                    inquiry = %receipt.id,
                    listing = %receipt.listing,
                    sender = %receipt.sender,
                    sent_at = %receipt.sent_at,
                    "inquiry submitted"
                );
                self.notice = Some("Inquiry sent! The owner will get back to you soon.".to_string());
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn gallery<'a>(&'a self, detail: &'a ListingDetail) -> Element<'a, ScreenMessage<Self>> {
        let listing = &detail.listing;
        let position = self.carousel.position(listing.images.len());
        let can_page = listing.images.len() > 1;
        container(
            row![
                button(text("<"))
                    .on_press_maybe(can_page.then(|| msg(RoomDetailMessage::PrevImage)))
                    .style(button::secondary),
                container(text(image_caption(listing, position)))
                    .center_x(Length::Fill)
                    .padding(40),
                button(text(">"))
                    .on_press_maybe(can_page.then(|| msg(RoomDetailMessage::NextImage)))
                    .style(button::secondary),
            ]
            .spacing(8)
            .align_y(Center),
        )
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
    }

    fn owner_actions(&self) -> Element<'_, ScreenMessage<Self>> {
        if self.confirm_delete {
            return row![
                text("Delete this listing? This cannot be undone.").width(Length::Fill),
                button(text("Delete"))
                    .on_press(msg(RoomDetailMessage::ConfirmDelete))
                    .style(button::danger),
                button(text("Cancel"))
                    .on_press(msg(RoomDetailMessage::CancelDelete))
                    .style(button::secondary),
            ]
            .spacing(8)
            .align_y(Center)
            .into();
        }
        row![
            button(text("Edit"))
                .on_press(msg(RoomDetailMessage::Edit))
                .style(button::secondary),
            button(text("Delete"))
                .on_press(msg(RoomDetailMessage::RequestDelete))
                .style(button::danger),
        ]
        .spacing(8)
        .into()
    }

    fn inquiry_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let form = &self.inquiry;
        container(
            column![
                text("Contact the owner").size(20),
                text_input("Your name", &form.name)
                    .on_input(|v| msg(RoomDetailMessage::InquiryName(v))),
                text_input("Email", &form.email)
                    .on_input(|v| msg(RoomDetailMessage::InquiryEmail(v))),
                text_input("Phone", &form.phone)
                    .on_input(|v| msg(RoomDetailMessage::InquiryPhone(v))),
                text_input("Preferred move-in date", &form.date)
                    .on_input(|v| msg(RoomDetailMessage::InquiryDate(v))),
                text_input("Message", &form.message)
                    .on_input(|v| msg(RoomDetailMessage::InquiryMessage(v)))
                    .on_submit(msg(RoomDetailMessage::SubmitInquiry)),
                button(text("Send Inquiry"))
                    .on_press(msg(RoomDetailMessage::SubmitInquiry))
                    .width(Length::Fill)
                    .style(button::primary),
            ]
            .spacing(10),
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
    }

    fn detail_view<'a>(
        &'a self,
        detail: &'a ListingDetail,
        state: &'a AppState,
    ) -> Element<'a, ScreenMessage<Self>> {
        let listing = &detail.listing;
        let favorite_label = if state.is_favorite(listing.id) {
            "♥ Saved"
        } else {
            "♡ Save"
        };

        let mut header = row![
            text(listing.title.as_str()).size(28).width(Length::Fill),
            button(text(favorite_label))
                .on_press(msg(RoomDetailMessage::ToggleFavorite))
                .style(button::secondary),
        ]
        .spacing(8)
        .align_y(Center);
        if listing.featured {
            header = header.push(
                container(text("Featured").size(12))
                    .padding([2, 8])
                    .style(container::bordered_box),
            );
        }

        let mut content = column![
            header,
            text(listing.location.name()),
            self.gallery(detail),
            price_line(listing),
        ]
        .spacing(14);
        if let Some(rating) = rating_line(listing) {
            content = content.push(text(rating));
        }
        if state.is_owner(listing) {
            content = content.push(self.owner_actions());
        }

        let owner = &detail.owner;
        let reviews = Column::with_children(detail.reviews.iter().map(|review| {
            column![
                row![
                    text(review.user.as_str()).width(Length::Fill),
                    text("★".repeat(usize::from(review.rating))),
                    text(review.date.as_str()).size(12),
                ]
                .spacing(8),
                text(review.comment.as_str()),
            ]
            .spacing(4)
            .into()
        }))
        .spacing(12);

        content
            .push(text("About this room").size(20))
            .push(text(listing.description.as_str()))
            .push(text("Amenities").size(20))
            .push(amenity_badges(&listing.amenities, None))
            .push(text("Hosted by").size(20))
            .push(text(format!(
                "{} · {}% response rate · responds {}",
                owner.name, owner.response_rate, owner.response_time
            )))
            .push(text(format!("Reviews ({})", detail.reviews.len())).size(20))
            .push(reviews)
            .push(self.inquiry_view())
            .into()
    }
}

#[derive(Debug, Clone, Copy)]
enum Hint {
    Tab(Tab),
    Edit(ListingId),
}

impl Screen for RoomDetailScreen {
    type Message = RoomDetailMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let nav = vec![
            button(text("Home"))
                .on_press(msg(RoomDetailMessage::Back))
                .style(button::text)
                .into(),
            button(text("Wishlist"))
                .on_press(msg(RoomDetailMessage::ShowFavorites))
                .style(button::text)
                .into(),
        ];

        let mut content = column![
            button(text("< Back to listings"))
                .on_press(msg(RoomDetailMessage::Back))
                .style(button::text),
        ]
        .spacing(16);
        if let Some(message) = &self.notice {
            content = content.push(notice(message, msg(RoomDetailMessage::DismissNotice)));
        }
        content = match &self.phase {
            Phase::Loading => content.push(text("Loading room details...")),
            Phase::NotFound => content
                .push(text("Room not found").size(24))
                .push(text("The room you're looking for doesn't exist or has been removed.")),
            Phase::Loaded(detail) => content.push(self.detail_view(detail, state)),
        };

        layout(nav, content)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            RoomDetailMessage::Activated(Ok(gate)) => {
                state.apply_session(&gate);
                return match gate {
                    SessionGate::Allowed(_) => self.fetch(state),
                    SessionGate::Redirect => navigate(Route::Login { register: false }),
                };
            }
            RoomDetailMessage::Activated(Err(e)) => {
                warn!(error = %e, "could not read session, treating as signed out");
                state.clear_user();
                return navigate(Route::Login { register: false });
            }
            RoomDetailMessage::Fetched(id, _) if Some(id) != self.id => {}
            RoomDetailMessage::Fetched(_, Ok(Some(detail))) => {
                self.carousel.reset();
                self.phase = Phase::Loaded(Box::new(detail));
            }
            RoomDetailMessage::Fetched(_, Ok(None)) => self.phase = Phase::NotFound,
            RoomDetailMessage::Fetched(id, Err(e)) => {
                warn!(%id, error = %e, "could not fetch listing");
                self.phase = Phase::NotFound;
            }
            RoomDetailMessage::CarouselTick => self.carousel.tick(),
            RoomDetailMessage::PrevImage => self.carousel.previous(self.image_count()),
            RoomDetailMessage::NextImage => self.carousel.next(self.image_count()),
            RoomDetailMessage::ToggleFavorite => {
                if let Some(detail) = self.detail() {
                    let id = detail.listing.id;
                    let (_, pending) = state.toggle_favorite_local(id);
                    return persist_favorites(pending);
                }
            }
            RoomDetailMessage::InquiryName(v) => self.inquiry.name = v,
            RoomDetailMessage::InquiryEmail(v) => self.inquiry.email = v,
            RoomDetailMessage::InquiryPhone(v) => self.inquiry.phone = v,
            RoomDetailMessage::InquiryMessage(v) => self.inquiry.message = v,
            RoomDetailMessage::InquiryDate(v) => self.inquiry.date = v,
            RoomDetailMessage::SubmitInquiry => self.submit_inquiry(),
            RoomDetailMessage::Edit => {
                if let Some(id) = self.id {
                    return self.leave_with_hint(state, Hint::Edit(id));
                }
            }
            RoomDetailMessage::RequestDelete => self.confirm_delete = true,
            RoomDetailMessage::CancelDelete => self.confirm_delete = false,
            RoomDetailMessage::ConfirmDelete => {
                self.confirm_delete = false;
                if let Some(id) = self.id {
                    state.request_delete(id);
                    state.confirm_delete();
                }
                return navigate(Route::Dashboard);
            }
            RoomDetailMessage::Back => return navigate(Route::Dashboard),
            RoomDetailMessage::ShowFavorites => {
                return self.leave_with_hint(state, Hint::Tab(Tab::Favorites));
            }
            RoomDetailMessage::HintSaved(route, saved) => {
                if let Err(e) = saved {
                    warn!(error = %e, "could not store dashboard hint");
                }
                return navigate(route);
            }
            RoomDetailMessage::DismissNotice => self.notice = None,
        }
        Task::none()
    }
}
