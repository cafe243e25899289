mod canvas;
mod side;
mod status;
