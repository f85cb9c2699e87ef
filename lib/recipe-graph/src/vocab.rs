//! Terms of the recipe vocabulary and the namespaces used for instance data.

/// Namespace IRIs together with the prefixes used when serializing a recipe graph.
pub mod ns {
    pub const RECIPE: &str = "http://example.org/recipe/";
    pub const MEAL: &str = "http://example.org/meal/";
    pub const INGREDIENT: &str = "http://example.org/ingredient/";
    pub const CATEGORY: &str = "http://example.org/category/";
    pub const CUISINE: &str = "http://example.org/cuisine/";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// The `(prefix, namespace)` pairs declared in every serialized graph.
    pub const PREFIXES: [(&str, &str); 8] = [
        ("recipe", RECIPE),
        ("meal", MEAL),
        ("ingredient", INGREDIENT),
        ("category", CATEGORY),
        ("cuisine", CUISINE),
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("xsd", XSD),
    ];
}

/// Classes and properties of the `recipe:` schema.
pub mod recipe {
    use oxigraph::model::NamedNodeRef;

    pub const MEAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/Meal");
    pub const INGREDIENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/Ingredient");
    pub const INGREDIENT_LINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/IngredientLine");
    pub const CATEGORY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/Category");
    pub const CUISINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/Cuisine");

    pub const HAS_NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasName");
    pub const HAS_INSTRUCTIONS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasInstructions");
    pub const HAS_THUMBNAIL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasThumbnail");
    pub const HAS_YOUTUBE_LINK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasYoutubeLink");
    pub const HAS_SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasSource");
    pub const HAS_TAG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasTag");
    pub const BELONGS_TO_CATEGORY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/belongsToCategory");
    pub const BELONGS_TO_CUISINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/belongsToCuisine");
    pub const HAS_INGREDIENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasIngredient");
    pub const HAS_INGREDIENT_LINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/hasIngredientLine");
    pub const INGREDIENT_NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/ingredientName");
    pub const INGREDIENT_MEASURE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/ingredientMeasure");
    pub const REFERS_TO_INGREDIENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/ingredient");
    pub const POSITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/recipe/position");
}
