//! Interface strings and the visitor's locale.

use acervo_content::Locale;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Interface strings of one locale.
#[derive(Debug)]
pub struct Labels {
    pub site_title: &'static str,
    pub site_subtitle: &'static str,
    pub site_tagline: &'static str,
    pub explore: &'static str,
    pub language: &'static str,
    pub back: &'static str,
    pub view_details: &'static str,

    pub buildings: &'static str,
    pub buildings_desc: &'static str,
    pub year_built: &'static str,
    pub location: &'static str,
    pub about_building: &'static str,
    pub timeline: &'static str,
    pub in_use: &'static str,

    pub courses: &'static str,
    pub courses_desc: &'static str,
    pub lective_years: &'static str,

    pub staff: &'static str,
    pub staff_desc: &'static str,
    pub teacher: &'static str,
    pub teachers: &'static str,
    pub non_teachers: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub process_number: &'static str,
    pub lective_years_worked: &'static str,
    pub taught_disciplines_count: &'static str,
    pub role: &'static str,
    pub staff_category: &'static str,
    pub group: &'static str,
    pub course: &'static str,
    pub disciplines: &'static str,
    pub load_more: &'static str,
    pub results: &'static str,

    pub publications: &'static str,
    pub publications_desc: &'static str,
    pub kind: &'static str,
    pub authors: &'static str,
    pub edition: &'static str,
    pub pages: &'static str,
    pub published: &'static str,

    pub services: &'static str,
    pub services_desc: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub status: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub about_service: &'static str,

    pub groups: &'static str,
    pub groups_desc: &'static str,

    pub gallery: &'static str,
    pub gallery_desc: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub subcategories: &'static str,
    pub photo: &'static str,
    pub photos: &'static str,

    pub documents: &'static str,
    pub documents_desc: &'static str,
    pub date: &'static str,
    pub year: &'static str,
    pub open_document: &'static str,

    pub materials: &'static str,
    pub materials_desc: &'static str,
    pub works: &'static str,
    pub categories: &'static str,
    pub building: &'static str,

    pub search: &'static str,
    pub search_placeholder: &'static str,
    pub apply: &'static str,
    pub clear: &'static str,
    pub from_year: &'static str,
    pub to_year: &'static str,
    pub all: &'static str,
    pub sort: &'static str,
    pub sort_name_az: &'static str,
    pub sort_name_za: &'static str,
    pub sort_year_newest: &'static str,
    pub sort_year_oldest: &'static str,
    pub sort_date_newest: &'static str,
    pub sort_date_oldest: &'static str,
    pub sort_count_most: &'static str,
    pub sort_count_least: &'static str,

    pub nothing_found: &'static str,
    pub not_found: &'static str,
    pub not_found_desc: &'static str,
    pub error_title: &'static str,
    pub error_desc: &'static str,
}

static PT: Labels = Labels {
    site_title: "Domingos Rebelo",
    site_subtitle: "Escola Secundária",
    site_tagline: "Descubra a história e o legado cultural",
    explore: "Toque para explorar",
    language: "Idioma",
    back: "Voltar",
    view_details: "Ver detalhes",

    buildings: "Edifícios",
    buildings_desc: "As instalações da escola ao longo da sua história",
    year_built: "Ano de construção",
    location: "Localização",
    about_building: "Sobre este edifício",
    timeline: "Cronologia",
    in_use: "em uso",

    courses: "Cursos",
    courses_desc: "Cursos lecionados ao longo da história da escola",
    lective_years: "Anos letivos",

    staff: "Pessoal",
    staff_desc: "Docentes e funcionários que passaram pela escola",
    teacher: "Docente",
    teachers: "Docentes",
    non_teachers: "Não docentes",
    yes: "Sim",
    no: "Não",
    process_number: "Número de processo",
    lective_years_worked: "Anos letivos trabalhados",
    taught_disciplines_count: "Disciplinas lecionadas",
    role: "Função",
    staff_category: "Categoria",
    group: "Grupo",
    course: "Curso",
    disciplines: "Disciplinas",
    load_more: "Carregar mais",
    results: "resultados",

    publications: "Publicações",
    publications_desc: "Publicações da escola ao longo dos anos",
    kind: "Tipo",
    authors: "Autores",
    edition: "Edição",
    pages: "Páginas",
    published: "Publicado em",

    services: "Serviços",
    services_desc: "Os serviços oferecidos pela escola",
    start_date: "Data de início",
    end_date: "Data de fim",
    status: "Estado",
    active: "Ativo",
    inactive: "Inativo",
    about_service: "Sobre este serviço",

    groups: "Grupos",
    groups_desc: "Clubes, associações e grupos da escola",

    gallery: "Galeria",
    gallery_desc: "Memórias visuais da escola",
    category: "Categoria",
    subcategory: "Subcategoria",
    subcategories: "Subcategorias",
    photo: "Foto",
    photos: "Fotos",

    documents: "Documentos",
    documents_desc: "Arquivo documental da escola",
    date: "Data",
    year: "Ano",
    open_document: "Abrir documento",

    materials: "Materiais",
    materials_desc: "Materiais utilizados na escola",
    works: "Trabalhos",
    categories: "Categorias",
    building: "Edifício",

    search: "Pesquisar",
    search_placeholder: "Nome ou número de processo",
    apply: "Aplicar",
    clear: "Limpar",
    from_year: "De",
    to_year: "Até",
    all: "Todos",
    sort: "Ordenar",
    sort_name_az: "Nome (A-Z)",
    sort_name_za: "Nome (Z-A)",
    sort_year_newest: "Ano (Mais Recente)",
    sort_year_oldest: "Ano (Mais Antigo)",
    sort_date_newest: "Data (Mais Recente)",
    sort_date_oldest: "Data (Mais Antiga)",
    sort_count_most: "Mais anos letivos",
    sort_count_least: "Menos anos letivos",

    nothing_found: "Nada encontrado.",
    not_found: "Página não encontrada",
    not_found_desc: "O conteúdo que procura não existe ou foi removido.",
    error_title: "Ocorreu um erro",
    error_desc: "Não foi possível carregar este conteúdo. Tente novamente mais tarde.",
};

static EN: Labels = Labels {
    site_title: "Domingos Rebelo",
    site_subtitle: "Secondary School",
    site_tagline: "Discover the history and cultural legacy",
    explore: "Tap to explore",
    language: "Language",
    back: "Back",
    view_details: "View details",

    buildings: "Buildings",
    buildings_desc: "The school's facilities throughout its history",
    year_built: "Year built",
    location: "Location",
    about_building: "About this building",
    timeline: "Timeline",
    in_use: "in use",

    courses: "Courses",
    courses_desc: "Courses taught throughout the school's history",
    lective_years: "School years",

    staff: "Staff",
    staff_desc: "Teachers and staff who worked at the school",
    teacher: "Teacher",
    teachers: "Teachers",
    non_teachers: "Non-teaching staff",
    yes: "Yes",
    no: "No",
    process_number: "Process number",
    lective_years_worked: "School years worked",
    taught_disciplines_count: "Subjects taught",
    role: "Role",
    staff_category: "Category",
    group: "Group",
    course: "Course",
    disciplines: "Subjects",
    load_more: "Load more",
    results: "results",

    publications: "Publications",
    publications_desc: "School publications over the years",
    kind: "Type",
    authors: "Authors",
    edition: "Edition",
    pages: "Pages",
    published: "Published on",

    services: "Services",
    services_desc: "Services offered by the school",
    start_date: "Start date",
    end_date: "End date",
    status: "Status",
    active: "Active",
    inactive: "Inactive",
    about_service: "About this service",

    groups: "Groups",
    groups_desc: "The school's clubs, associations and groups",

    gallery: "Gallery",
    gallery_desc: "Visual memories of the school",
    category: "Category",
    subcategory: "Subcategory",
    subcategories: "Subcategories",
    photo: "Photo",
    photos: "Photos",

    documents: "Documents",
    documents_desc: "The school's document archive",
    date: "Date",
    year: "Year",
    open_document: "Open document",

    materials: "Materials",
    materials_desc: "Materials used at the school",
    works: "Works",
    categories: "Categories",
    building: "Building",

    search: "Search",
    search_placeholder: "Name or process number",
    apply: "Apply",
    clear: "Clear",
    from_year: "From",
    to_year: "To",
    all: "All",
    sort: "Sort",
    sort_name_az: "Name (A-Z)",
    sort_name_za: "Name (Z-A)",
    sort_year_newest: "Year (Newest)",
    sort_year_oldest: "Year (Oldest)",
    sort_date_newest: "Date (Newest)",
    sort_date_oldest: "Date (Oldest)",
    sort_count_most: "Most school years",
    sort_count_least: "Fewest school years",

    nothing_found: "Nothing found.",
    not_found: "Page not found",
    not_found_desc: "The content you are looking for does not exist or was removed.",
    error_title: "Something went wrong",
    error_desc: "This content could not be loaded. Please try again later.",
};

/// Interface strings for `locale`.
pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Pt => &PT,
        Locale::En => &EN,
    }
}

/// Value of cookie `name` in a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// The visitor's locale, from the `lang` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lang(pub Locale);

impl Lang {
    pub fn locale(self) -> Locale {
        self.0
    }

    pub fn labels(self) -> &'static Labels {
        labels(self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Lang {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .find_map(|h| cookie_value(h, Locale::COOKIE));
        Ok(Lang(Locale::from_cookie(value)))
    }
}
