mod api;
mod governance;
mod router;
