//! Page model: sections, their sliders, and the page-wide ordering.

mod section;
mod section_list;
mod slider;
mod slider_list;

pub use section::Section;
pub use section_list::SectionList;
pub use slider::Slider;
pub use slider_list::SliderList;
