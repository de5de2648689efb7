use std::sync::Arc;

use crate::{
    core::db::{Favorites, SqliteStore},
    gui::screens::{
        Route, ScreenMessage, dashboard::DashboardScreen, login::LoginScreen,
        room_detail::RoomDetailScreen,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    StoreOpened(Result<Arc<SqliteStore>, String>),
    Navigate(Route),
    CarouselTick,
    SaveFavorites(Favorites),
    FavoritesSaved(Result<(), String>),
    Login(ScreenMessage<LoginScreen>),
    Dashboard(ScreenMessage<DashboardScreen>),
    RoomDetail(ScreenMessage<RoomDetailScreen>),
}
