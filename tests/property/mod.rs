mod drag_properties;
mod layout_properties;
