use crate::injection::Injector;

pub(crate) struct ApiServerState {
    pub(crate) injector: Injector,
}
