use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, Row, button, column, container, pick_list, row, text, text_input},
};
use tracing::{info, warn};

use crate::{
    core::{
        AppState, Carousel, Facet, FormError, ListingDraft, ListingFilter, SortOrder, Tab,
        db::{DashboardActivation, SessionGate, SessionRepository},
        filter::result_count_label,
        model::{Amenity, Listing, ListingId, Location},
    },
    gui::{
        screens::{ParentMessage, Route, Screen, ScreenMessage, navigate, persist_favorites},
        widgets::{amenity_badges, image_caption, layout, notice, price_line, rating_line},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

const GRID_COLUMNS: usize = 3;

/// Listing form state. Image references are edited as one comma separated
/// line.
#[derive(Debug, Clone)]
struct Editor {
    draft: ListingDraft,
    images: String,
}

impl Editor {
    fn new(draft: ListingDraft) -> Self {
        let images = draft.images.join(", ");
        Self { draft, images }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardScreen {
    filter: ListingFilter,
    view_mode: ViewMode,
    filter_open: bool,
    carousel: Carousel,
    editor: Option<Editor>,
    notice: Option<String>,
    activated: bool,
}

#[derive(Debug, Clone)]
pub enum DashboardMessage {
    Activated(Result<DashboardActivation, String>),
    CarouselTick,
    QueryChanged(String),
    SelectTab(Tab),
    ToggleFacet(Facet),
    ClearFacets,
    ToggleFilterPanel,
    SetSort(SortOrder),
    SetViewMode(ViewMode),
    ToggleFavorite(ListingId),
    OpenRoom(ListingId),
    NewListing,
    EditListing(ListingId),
    DraftTitle(String),
    DraftRent(String),
    DraftDeposit(String),
    DraftDescription(String),
    DraftImages(String),
    DraftLocation(Location),
    DraftToggleAmenity(Amenity),
    SaveDraft,
    CancelDraft,
    RequestDelete(ListingId),
    ConfirmDelete,
    CancelDelete,
    Logout,
    LoggedOut(Result<(), String>),
    DismissNotice,
}

fn msg(message: DashboardMessage) -> ScreenMessage<DashboardScreen> {
    ScreenMessage::ScreenMessage(message)
}

/// Primary style when `selected`, secondary otherwise.
fn toggle_style(selected: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |theme, status| {
        if selected {
            button::primary(theme, status)
        } else {
            button::secondary(theme, status)
        }
    }
}

impl DashboardScreen {
    pub fn open(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let store = state.store();
        (
            Self {
                filter: ListingFilter::default(),
                view_mode: ViewMode::default(),
                filter_open: false,
                carousel: Carousel::new(),
                editor: None,
                notice: None,
                activated: false,
            },
            Task::perform(
                async move {
                    DashboardActivation::load(&*store)
                        .await
                        .map_err(|e| format!("{e:#}"))
                },
                |activation| msg(DashboardMessage::Activated(activation)),
            ),
        )
    }

    fn activate(
        &mut self,
        activation: DashboardActivation,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        state.apply_session(&activation.gate);
        if let SessionGate::Redirect = activation.gate {
            return navigate(Route::Login { register: false });
        }
        self.activated = true;
        if let Some(tab) = activation.active_tab {
            self.filter.tab = tab;
        }
        if let Some(id) = activation.edit_listing {
            self.edit(id, state);
        }
        Task::none()
    }

    fn edit(&mut self, id: ListingId, state: &AppState) {
        match state.listings().get(id) {
            Some(listing) => self.editor = Some(Editor::new(ListingDraft::from_listing(listing))),
            None => self.notice = Some(FormError::UnknownListing(id).to_string()),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut ListingDraft> {
        self.editor.as_mut().map(|editor| &mut editor.draft)
    }

    fn save_draft(&mut self, state: &mut AppState) {
        let Some(editor) = &self.editor else {
            return;
        };
        match state.save_listing(&editor.draft) {
            Ok(id) => {
                info!(%id, "listing saved from dashboard");
                self.editor = None;
                self.notice = None;
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn logout(&self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let store = state.store();
        Task::perform(
            async move { store.clear_user().await.map_err(|e| format!("{e:#}")) },
            |cleared| msg(DashboardMessage::LoggedOut(cleared)),
        )
    }

    fn toolbar(&self) -> Element<'_, ScreenMessage<Self>> {
        let tabs = Row::with_children(Tab::ALL.iter().map(|&tab| {
            button(text(tab.label()))
                .on_press(msg(DashboardMessage::SelectTab(tab)))
                .style(toggle_style(self.filter.tab == tab))
                .into()
        }))
        .spacing(8);

        let filters_label = match self.filter.facets.len() {
            0 => "Filters".to_string(),
            n => format!("Filters ({n})"),
        };

        let controls = row![
            text_input("Search by title, location or description", &self.filter.query)
                .on_input(|q| msg(DashboardMessage::QueryChanged(q)))
                .width(Length::Fill),
            button(text(filters_label))
                .on_press(msg(DashboardMessage::ToggleFilterPanel))
                .style(toggle_style(self.filter_open)),
            pick_list(SortOrder::ALL, Some(self.filter.sort), |sort| {
                msg(DashboardMessage::SetSort(sort))
            }),
            button(text("Grid"))
                .on_press(msg(DashboardMessage::SetViewMode(ViewMode::Grid)))
                .style(toggle_style(self.view_mode == ViewMode::Grid)),
            button(text("List"))
                .on_press(msg(DashboardMessage::SetViewMode(ViewMode::List)))
                .style(toggle_style(self.view_mode == ViewMode::List)),
        ]
        .spacing(8)
        .align_y(Center);

        column![tabs, controls].spacing(12).into()
    }

    fn facet_buttons<'a>(&self, facets: impl Iterator<Item = Facet>) -> Element<'a, ScreenMessage<Self>> {
        Row::with_children(facets.map(|facet| {
            button(text(facet.name()).size(13))
                .on_press(msg(DashboardMessage::ToggleFacet(facet)))
                .style(toggle_style(self.filter.is_facet_selected(facet)))
                .into()
        }))
        .spacing(6)
        .wrap()
        .into()
    }

    fn filter_panel(&self) -> Element<'_, ScreenMessage<Self>> {
        container(
            column![
                row![
                    text("Filters").size(18).width(Length::Fill),
                    button(text("Clear all"))
                        .on_press_maybe(
                            (!self.filter.facets.is_empty())
                                .then(|| msg(DashboardMessage::ClearFacets)),
                        )
                        .style(button::text),
                ]
                .align_y(Center),
                text("Amenities"),
                self.facet_buttons(Amenity::ALL.iter().copied().map(Facet::Amenity)),
                text("Location"),
                self.facet_buttons(Location::ALL.iter().copied().map(Facet::Location)),
            ]
            .spacing(10),
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
    }

    fn card<'a>(&'a self, listing: &'a Listing, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let id = listing.id;
        let position = self.carousel.position(listing.images.len());

        let mut header = row![text(listing.title.as_str()).size(18).width(Length::Fill)]
            .spacing(8)
            .align_y(Center);
        if listing.featured {
            header = header.push(container(text("Featured").size(12)).padding([2, 8]).style(container::bordered_box));
        }

        let mut body = column![
            header,
            text(image_caption(listing, position)).size(12),
            text(listing.location.name()),
            price_line(listing),
        ]
        .spacing(6);
        if let Some(rating) = rating_line(listing) {
            body = body.push(text(rating).size(13));
        }
        body = body.push(amenity_badges(&listing.amenities, Some(3)));

        let favorite_label = if state.is_favorite(id) { "♥ Saved" } else { "♡ Save" };
        let mut actions = row![
            button(text("View Details"))
                .on_press(msg(DashboardMessage::OpenRoom(id)))
                .style(button::primary),
            button(text(favorite_label))
                .on_press(msg(DashboardMessage::ToggleFavorite(id)))
                .style(button::secondary),
        ]
        .spacing(8);
        if state.is_owner(listing) {
            actions = actions
                .push(
                    button(text("Edit"))
                        .on_press(msg(DashboardMessage::EditListing(id)))
                        .style(button::secondary),
                )
                .push(
                    button(text("Delete"))
                        .on_press(msg(DashboardMessage::RequestDelete(id)))
                        .style(button::danger),
                );
        }
        body = body.push(actions);

        if state.pending_delete() == Some(id) {
            body = body.push(
                row![
                    text("Delete this listing?").width(Length::Fill),
                    button(text("Delete"))
                        .on_press(msg(DashboardMessage::ConfirmDelete))
                        .style(button::danger),
                    button(text("Cancel"))
                        .on_press(msg(DashboardMessage::CancelDelete))
                        .style(button::secondary),
                ]
                .spacing(8)
                .align_y(Center),
            );
        }

        container(body)
            .padding(16)
            .width(Length::Fill)
            .style(container::bordered_box)
            .into()
    }

    fn listings<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let visible = state.filtered(&self.filter);
        if visible.is_empty() {
            return container(text("No rooms found. Try adjusting your search or filters."))
                .padding(32)
                .center_x(Length::Fill)
                .into();
        }

        match self.view_mode {
            ViewMode::List => Column::with_children(visible.into_iter().map(|l| self.card(l, state)))
                .spacing(12)
                .into(),
            ViewMode::Grid => Column::with_children(visible.chunks(GRID_COLUMNS).map(|chunk| {
                let mut cells: Vec<Element<'a, _>> =
                    chunk.iter().map(|l| self.card(*l, state)).collect();
                while cells.len() < GRID_COLUMNS {
                    cells.push(container(text("")).width(Length::Fill).into());
                }
                Row::with_children(cells).spacing(12).into()
            }))
            .spacing(12)
            .into(),
        }
    }

    fn editor_view<'a>(&'a self, editor: &'a Editor) -> Element<'a, ScreenMessage<Self>> {
        let draft = &editor.draft;
        let heading = if draft.is_editing() { "Edit Listing" } else { "Add New Listing" };
        let amenities = Row::with_children(Amenity::ALL.iter().map(|&amenity| {
            button(text(amenity.name()).size(13))
                .on_press(msg(DashboardMessage::DraftToggleAmenity(amenity)))
                .style(toggle_style(draft.amenities.contains(&amenity)))
                .into()
        }))
        .spacing(6)
        .wrap();

        container(
            column![
                text(heading).size(22),
                text_input("Title", &draft.title).on_input(|v| msg(DashboardMessage::DraftTitle(v))),
                row![
                    text_input("Monthly rent", &draft.rent)
                        .on_input(|v| msg(DashboardMessage::DraftRent(v))),
                    text_input("Security deposit", &draft.deposit)
                        .on_input(|v| msg(DashboardMessage::DraftDeposit(v))),
                ]
                .spacing(8),
                pick_list(Location::ALL, draft.location, |l| msg(DashboardMessage::DraftLocation(l)))
                    .placeholder("Select location"),
                text_input("Description", &draft.description)
                    .on_input(|v| msg(DashboardMessage::DraftDescription(v))),
                text_input("Image references, comma separated", &editor.images)
                    .on_input(|v| msg(DashboardMessage::DraftImages(v))),
                text("Amenities"),
                amenities,
                row![
                    button(text(if draft.is_editing() { "Update Listing" } else { "Add Listing" }))
                        .on_press(msg(DashboardMessage::SaveDraft))
                        .style(button::primary),
                    button(text("Cancel"))
                        .on_press(msg(DashboardMessage::CancelDraft))
                        .style(button::secondary),
                ]
                .spacing(8),
            ]
            .spacing(10),
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
    }
}

impl Screen for DashboardScreen {
    type Message = DashboardMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let greeting = state
            .user()
            .map(|user| format!("Hello, {}", user.name))
            .unwrap_or_default();
        let nav = vec![
            text(greeting).into(),
            button(text("Add Listing"))
                .on_press(msg(DashboardMessage::NewListing))
                .style(button::primary)
                .into(),
            button(text("Logout"))
                .on_press(msg(DashboardMessage::Logout))
                .style(button::secondary)
                .into(),
        ];

        if !self.activated {
            return layout(nav, text("Loading..."));
        }

        let mut content = Column::new().spacing(16);
        if let Some(message) = &self.notice {
            content = content.push(notice(message, msg(DashboardMessage::DismissNotice)));
        }
        if let Some(editor) = &self.editor {
            content = content.push(self.editor_view(editor));
        }
        content = content.push(self.toolbar());
        if self.filter_open {
            content = content.push(self.filter_panel());
        }
        let count = state.filtered(&self.filter).len();
        content = content
            .push(text(result_count_label(count)).size(14))
            .push(self.listings(state));

        layout(nav, content)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            DashboardMessage::Activated(Ok(activation)) => return self.activate(activation, state),
            DashboardMessage::Activated(Err(e)) => {
                warn!(error = %e, "could not read session, treating as signed out");
                state.clear_user();
                return navigate(Route::Login { register: false });
            }
            DashboardMessage::CarouselTick => self.carousel.tick(),
            DashboardMessage::QueryChanged(query) => self.filter.query = query,
            DashboardMessage::SelectTab(tab) => self.filter.tab = tab,
            DashboardMessage::ToggleFacet(facet) => self.filter.toggle_facet(facet),
            DashboardMessage::ClearFacets => self.filter.clear_facets(),
            DashboardMessage::ToggleFilterPanel => self.filter_open = !self.filter_open,
            DashboardMessage::SetSort(sort) => self.filter.sort = sort,
            DashboardMessage::SetViewMode(mode) => self.view_mode = mode,
            DashboardMessage::ToggleFavorite(id) => {
                let (_, pending) = state.toggle_favorite_local(id);
                return persist_favorites(pending);
            }
            DashboardMessage::OpenRoom(id) => return navigate(Route::Room(id.to_string())),
            DashboardMessage::NewListing => {
                self.editor = Some(Editor::new(ListingDraft::new()));
            }
            DashboardMessage::EditListing(id) => self.edit(id, state),
            DashboardMessage::DraftTitle(v) => {
                if let Some(draft) = self.draft_mut() {
                    draft.title = v;
                }
            }
            DashboardMessage::DraftRent(v) => {
                if let Some(draft) = self.draft_mut() {
                    draft.rent = v;
                }
            }
            DashboardMessage::DraftDeposit(v) => {
                if let Some(draft) = self.draft_mut() {
                    draft.deposit = v;
                }
            }
            DashboardMessage::DraftDescription(v) => {
                if let Some(draft) = self.draft_mut() {
                    draft.description = v;
                }
            }
            DashboardMessage::DraftImages(v) => {
                if let Some(editor) = &mut self.editor {
                    editor.draft.images = v
                        .split(',')
                        .map(str::trim)
                        .filter(|image| !image.is_empty())
                        .map(str::to_string)
                        .collect();
                    editor.images = v;
                }
            }
            DashboardMessage::DraftLocation(location) => {
                if let Some(draft) = self.draft_mut() {
                    draft.location = Some(location);
                }
            }
            DashboardMessage::DraftToggleAmenity(amenity) => {
                if let Some(draft) = self.draft_mut() {
                    draft.toggle_amenity(amenity);
                }
            }
            DashboardMessage::SaveDraft => self.save_draft(state),
            DashboardMessage::CancelDraft => self.editor = None,
            DashboardMessage::RequestDelete(id) => state.request_delete(id),
            DashboardMessage::ConfirmDelete => {
                if let Some(listing) = state.confirm_delete() {
                    if self.editor.as_ref().and_then(|e| e.draft.id) == Some(listing.id) {
                        self.editor = None;
                    }
                }
            }
            DashboardMessage::CancelDelete => state.cancel_delete(),
            DashboardMessage::Logout => return self.logout(state),
            DashboardMessage::LoggedOut(result) => {
                if let Err(e) = result {
                    warn!(error = %e, "could not clear stored user");
                }
                state.clear_user();
                return navigate(Route::Login { register: false });
            }
            DashboardMessage::DismissNotice => self.notice = None,
        }
        Task::none()
    }
}
